//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - sync: Sync command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod sync;

pub use completions::CompletionsArgs;
pub use sync::SyncArgs;

/// agentport - port Claude Code configuration to other AI coding agents
#[derive(Parser, Debug)]
#[command(
    name = "agentport",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Sync Claude Code commands, agents, skills and MCP servers to other AI coding agents",
    long_about = "agentport converts a Claude Code configuration (commands, agents, skills, MCP servers) \
                  into the layout expected by other agents (Pi, Cursor, Factory Droid) and merges it \
                  into their config directories without clobbering what is already there.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  agentport sync --to pi                      \x1b[90m# Sync ~/.claude to ~/.pi/agent\x1b[0m\n   \
                  agentport sync --to all --dry-run           \x1b[90m# Show what every target would get\x1b[0m\n   \
                  agentport sync --to cursor --source ./plugin \x1b[90m# Sync a plugin directory\x1b[0m\n   \
                  agentport targets                           \x1b[90m# List supported targets\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/agentport/config.yaml)
    #[arg(long, short = 'c', global = true, env = "AGENTPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync a Claude configuration to one or more targets
    Sync(SyncArgs),

    /// List supported sync targets
    Targets,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
