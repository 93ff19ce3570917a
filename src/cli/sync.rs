use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Sync ~/.claude to Pi:\n    agentport sync --to pi\n\n\
                   Sync to every target:\n    agentport sync --to all\n\n\
                   Sync a plugin into a project:\n    agentport sync --to pi --source ./plugin --output ./project\n\n\
                   Preview without writing:\n    agentport sync --to cursor droid --dry-run")]
pub struct SyncArgs {
    /// Targets to sync (pi, cursor, droid, or all)
    #[arg(long = "to", short = 't', value_name = "TARGET", num_args = 1.., required = true)]
    pub targets: Vec<String>,

    /// Claude configuration directory (defaults to ~/.claude)
    #[arg(long, short = 's', value_name = "DIR")]
    pub source: Option<String>,

    /// Output root, overriding the target default (single target only)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<String>,

    /// Copy skill directories instead of symlinking them
    #[arg(long)]
    pub copy_skills: bool,

    /// Show what would be written without touching disk
    #[arg(long)]
    pub dry_run: bool,
}
