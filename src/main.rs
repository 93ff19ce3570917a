//! agentport - port Claude Code configuration to other AI coding agents
//!
//! Converts commands, agents, skills and MCP server declarations into the
//! configuration surface of other agent tools (Pi, Cursor, Factory Droid)
//! and merges the result into their config directories idempotently.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod convert;
mod domain;
mod error;
mod source;
mod sync;
mod target;
#[cfg(test)]
mod test_fixtures;
mod ui;
mod universal;

use cli::{Cli, Commands};

/// Install a stderr subscriber when `RUST_LOG` is set or `-v` is given.
/// Without one, tracing events are discarded.
fn init_tracing(verbose: bool) {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set && !verbose {
        return;
    }

    let env_filter = if rust_log_set {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("agentport=debug")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sync(args) => commands::sync::run(cli.config, args),
        Commands::Targets => commands::targets::run(),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
