//! Sync command implementation
//!
//! The sync process:
//! 1. Load configuration and resolve the requested targets
//! 2. Resolve and load the source tree
//! 3. For each target: assemble a bundle, then write it (or print the plan)
//! 4. Report targets that failed; one failure never stops the others

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::cli::SyncArgs;
use crate::config::{AppConfig, Candidate, Resolution, absolutize, resolve};
use crate::convert::Assembler;
use crate::domain::SourceConfig;
use crate::error::{Result, config_invalid, fs::io_error, source_not_found, targets_failed};
use crate::source;
use crate::sync::{SkillMode, SyncOptions, SyncWriter};
use crate::target::{Target, TargetRegistry};
use crate::ui;

pub const SOURCE_ENV: &str = "AGENTPORT_SOURCE";

const DEFAULT_SOURCE_DIR: &str = ".claude";

/// Backup suffix format; the run timestamp is taken once and shared by all targets
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S-%3fZ";

/// Everything a single target sync needs from the run
struct RunContext<'a> {
    config: &'a AppConfig,
    registry: &'a TargetRegistry,
    source: &'a SourceConfig,
    writer: SyncWriter,
    home: Option<PathBuf>,
    cwd: PathBuf,
    output: Option<&'a str>,
    dry_run: bool,
}

/// Run sync command
pub fn run(config_path: Option<PathBuf>, args: SyncArgs) -> Result<()> {
    let registry = TargetRegistry::default();
    let (config, loaded_from) = AppConfig::load(config_path)?;
    if let Some(path) = &loaded_from {
        debug!(path = %path.display(), "Using configuration file");
    }
    config.validate(&registry)?;

    let targets = registry.resolve(&args.targets)?;
    if args.output.is_some() && targets.len() != 1 {
        return Err(config_invalid("--output can only be used with a single target"));
    }

    let home = dirs::home_dir();
    let cwd = std::env::current_dir().map_err(|e| io_error(e.to_string()))?;

    let source_root = resolve_source_root(args.source.as_deref(), &config, home.as_deref(), &cwd)?;
    let source = source::load(&source_root)?;

    if source.has_potential_secrets() {
        ui::display_secret_warning();
    }
    ui::display_source_summary(&source);

    let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let skill_mode = if args.copy_skills {
        SkillMode::Copy
    } else {
        config.skills.mode
    };

    let ctx = RunContext {
        config: &config,
        registry: &registry,
        source: &source,
        writer: SyncWriter::new(SyncOptions {
            skill_mode,
            timestamp,
        }),
        home,
        cwd,
        output: args.output.as_deref(),
        dry_run: args.dry_run,
    };

    let mut failed = Vec::new();
    for target in &targets {
        if let Err(e) = sync_target(&ctx, target) {
            ui::display_target_failure(target, &e);
            failed.push(target.id.clone());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(targets_failed(&failed))
    }
}

/// Source directory: `--source`, config `source`, `AGENTPORT_SOURCE`, `~/.claude`
fn resolve_source_root(
    flag: Option<&str>,
    config: &AppConfig,
    home: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf> {
    let env = std::env::var(SOURCE_ENV).ok().filter(|s| !s.is_empty());
    let candidates = [
        Candidate::explicit("--source", flag.map(|s| absolutize(s, home, cwd))),
        Candidate::explicit(
            "config",
            config.source.as_deref().map(|s| absolutize(s, home, cwd)),
        ),
        Candidate::explicit(SOURCE_ENV, env.as_deref().map(|s| absolutize(s, home, cwd))),
        Candidate::explicit("default", home.map(|h| h.join(DEFAULT_SOURCE_DIR))),
    ];

    match resolve(candidates) {
        Resolution::Found { path, origin } => {
            debug!(path = %path.display(), origin, "Resolved source directory");
            Ok(path)
        }
        Resolution::NotFound => Err(source_not_found(format!("~/{DEFAULT_SOURCE_DIR}"))),
    }
}

/// Output root: `--output`, config `targets.<id>.root`, the target default
fn resolve_target_root(ctx: &RunContext<'_>, target: &Target) -> Result<PathBuf> {
    let configured = ctx.config.target_root(&target.id, ctx.registry);
    let candidates = [
        Candidate::explicit(
            "--output",
            ctx.output.map(|s| absolutize(s, ctx.home.as_deref(), &ctx.cwd)),
        ),
        Candidate::explicit(
            "config",
            configured.map(|s| absolutize(s, ctx.home.as_deref(), &ctx.cwd)),
        ),
        Candidate::explicit(
            "default",
            ctx.home.as_deref().map(|h| target.default_root_in(h)),
        ),
    ];

    resolve(candidates).path().map(Path::to_path_buf).ok_or_else(|| {
        config_invalid(format!(
            "cannot determine output root for '{}': no home directory, pass --output",
            target.id
        ))
    })
}

fn sync_target(ctx: &RunContext<'_>, target: &Target) -> Result<()> {
    let root = resolve_target_root(ctx, target)?;
    let paths = target.resolve_paths(&root);
    let bundle = Assembler::new(target, ctx.config.rewrite.reserved_paths.iter().cloned())
        .assemble(ctx.source);

    if bundle.is_empty() {
        ui::display_nothing_to_sync(target);
        return Ok(());
    }

    if ctx.dry_run {
        ui::display_plan(target, &root, &SyncWriter::plan(&bundle, target, &paths));
        return Ok(());
    }

    let report = ctx.writer.write(&bundle, target, &paths)?;
    info!(target = %target.id, changed = report.changed(), "Target synced");
    ui::display_report(target, &report);
    Ok(())
}
