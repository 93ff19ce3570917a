//! Console presentation for sync runs
//!
//! Status lines go to stdout; warnings and per-target failures go to stderr.

use std::path::Path;

use console::Style;

use crate::common::string_utils::count_noun;
use crate::domain::SourceConfig;
use crate::sync::{ArtifactKind, PlannedWrite, SyncReport, WriteOutcome};
use crate::target::Target;

/// One line per built-in target
pub fn display_targets(targets: &[Target], home: Option<&Path>) {
    for target in targets {
        let root = match home {
            Some(home) => target.default_root_in(home).display().to_string(),
            None => format!("~/{}", target.default_root),
        };
        println!(
            "  {} {} {}",
            Style::new().bold().cyan().apply_to(format!("{:<8}", target.id)),
            Style::new().bold().apply_to(format!("{:<14}", target.name)),
            Style::new().dim().apply_to(root)
        );

        let mut provides = vec!["skills"];
        if target.capabilities.prompts {
            provides.push("prompts");
        }
        if target.capabilities.generated_skills {
            provides.push("agent skills");
        }
        if !target.extensions.is_empty() {
            provides.push("extensions");
        }
        if target.server_map.is_some() {
            provides.push("mcp servers");
        }
        if target.managed_block.is_some() {
            provides.push("instructions block");
        }
        println!("           {}", provides.join(", "));
    }
}

pub fn display_source_summary(source: &SourceConfig) {
    println!(
        "Syncing {}, {}, {}, {} from {}",
        count_noun(source.commands.len(), "command"),
        count_noun(source.agents.len(), "agent"),
        count_noun(source.skills.len(), "skill"),
        count_noun(source.mcp_servers.len(), "MCP server"),
        source.root.display()
    );
}

pub fn display_secret_warning() {
    eprintln!(
        "{} MCP servers contain env vars that may include secrets (API keys, tokens).",
        Style::new().yellow().bold().apply_to("Warning:")
    );
    eprintln!("   These will be copied to the target config. Review before sharing the config file.");
}

/// Dry-run listing for one target
pub fn display_plan(target: &Target, root: &Path, plan: &[PlannedWrite]) {
    println!(
        "{} {} ({})",
        Style::new().bold().apply_to("Would sync to"),
        Style::new().cyan().apply_to(&target.id),
        root.display()
    );
    if plan.is_empty() {
        println!("  Nothing to write.");
    }
    for write in plan {
        println!(
            "  {} {}",
            Style::new().dim().apply_to(format!("{:<13}", write.kind)),
            write.path.display()
        );
    }
}

/// Summary after a target was written
pub fn display_report(target: &Target, report: &SyncReport) {
    let unchanged = report.written.len() - report.changed();
    let mut counts: Vec<String> = [
        (ArtifactKind::Prompt, "prompt"),
        (ArtifactKind::GeneratedSkill, "agent skill"),
        (ArtifactKind::SkillDir, "skill"),
        (ArtifactKind::Extension, "extension"),
    ]
    .into_iter()
    .filter_map(|(kind, noun)| match report.count(kind) {
        0 => None,
        n => Some(count_noun(n, noun)),
    })
    .collect();
    if unchanged > 0 {
        counts.push(format!("{unchanged} unchanged"));
    }

    println!(
        "{} Synced to {}: {}",
        Style::new().green().bold().apply_to("✓"),
        Style::new().cyan().apply_to(&target.id),
        report.root.display()
    );
    if !counts.is_empty() {
        println!("  {}", counts.join(", "));
    }

    for written in &report.written {
        if matches!(
            written.kind,
            ArtifactKind::ServerMap | ArtifactKind::ManagedBlock
        ) {
            let status = match written.outcome {
                WriteOutcome::Created => "created",
                WriteOutcome::Updated => "updated",
                WriteOutcome::Unchanged => "unchanged",
            };
            println!("  {} {} ({status})", written.kind, written.path.display());
        }
    }
    for backup in &report.backups {
        println!(
            "  {} {}",
            Style::new().dim().apply_to("backup"),
            backup.display()
        );
    }
}

pub fn display_nothing_to_sync(target: &Target) {
    println!(
        "{} Nothing to sync to {}",
        Style::new().dim().apply_to("-"),
        Style::new().cyan().apply_to(&target.id)
    );
}

pub fn display_target_failure(target: &Target, error: &dyn std::fmt::Display) {
    eprintln!(
        "{} Failed to sync {}: {error}",
        Style::new().red().bold().apply_to("✗"),
        target.id
    );
}
