//! Targets command implementation

use crate::error::Result;
use crate::target::TargetRegistry;
use crate::ui;

/// List built-in targets with their default roots
pub fn run() -> Result<()> {
    let registry = TargetRegistry::default();
    println!("Supported targets:");
    ui::display_targets(registry.all(), dirs::home_dir().as_deref());
    println!();
    println!("Aliases: factory -> droid, cursor-ai -> cursor");
    Ok(())
}
