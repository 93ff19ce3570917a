//! Version command implementation

use crate::error::Result;
use crate::target::TargetRegistry;

/// Run version command
pub fn run() -> Result<()> {
    println!("agentport {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    let targets: Vec<_> = TargetRegistry::default()
        .all()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    println!("  Targets: {}", targets.join(", "));

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
