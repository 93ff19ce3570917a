//! Sync writer
//!
//! Persists a [`Bundle`] under a target's resolved paths:
//! - generated prompts, skills and extensions are overwritten outright
//! - pass-through skills are mirrored (symlink or copy)
//! - the server map and the managed block are read-modify-write merges
//!   and always run last
//!
//! Writes are committed one by one. A failure aborts the rest of the bundle
//! but earlier writes stay in place.

pub mod file_ops;
pub mod managed_block;
pub mod mirror;
pub mod server_map;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::fs::remove_entry;
use crate::domain::Bundle;
use crate::error::{Result, fs::write_error};
use crate::target::{Target, TargetPaths};

pub use file_ops::FileState;
pub use mirror::SkillMode;

const SKILL_FILE: &str = "SKILL.md";

/// Effect of one write on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Artifact classes, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Prompt,
    GeneratedSkill,
    SkillDir,
    Extension,
    ServerMap,
    ManagedBlock,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Prompt => "prompt",
            ArtifactKind::GeneratedSkill => "skill",
            ArtifactKind::SkillDir => "skill dir",
            ArtifactKind::Extension => "extension",
            ArtifactKind::ServerMap => "mcp servers",
            ArtifactKind::ManagedBlock => "instructions",
        };
        f.pad(label)
    }
}

/// One path the writer will touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// One path the writer did touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Summary of one target sync
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub target: String,
    pub root: PathBuf,
    pub written: Vec<WrittenArtifact>,
    pub backups: Vec<PathBuf>,
}

impl SyncReport {
    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.written.iter().filter(|w| w.kind == kind).count()
    }

    pub fn changed(&self) -> usize {
        self.written
            .iter()
            .filter(|w| w.outcome != WriteOutcome::Unchanged)
            .count()
    }

    fn record(&mut self, kind: ArtifactKind, path: PathBuf, outcome: WriteOutcome) {
        debug!(?kind, path = %path.display(), ?outcome, "Synced artifact");
        self.written.push(WrittenArtifact {
            kind,
            path,
            outcome,
        });
    }
}

/// Options shared by every target in a run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub skill_mode: SkillMode,
    /// Run timestamp used in backup names
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct SyncWriter {
    options: SyncOptions,
}

impl SyncWriter {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Every path [`SyncWriter::write`] would touch for `bundle`, in order
    pub fn plan(bundle: &Bundle, target: &Target, paths: &TargetPaths) -> Vec<PlannedWrite> {
        let mut plan = Vec::new();
        let mut push = |kind, path| plan.push(PlannedWrite { kind, path });

        for prompt in &bundle.prompts {
            push(ArtifactKind::Prompt, prompt_path(paths, &prompt.name));
        }
        for skill in &bundle.generated_skills {
            push(
                ArtifactKind::GeneratedSkill,
                paths.skills_dir.join(&skill.name).join(SKILL_FILE),
            );
        }
        for dir in &bundle.skill_dirs {
            push(ArtifactKind::SkillDir, paths.skills_dir.join(&dir.name));
        }
        for extension in &bundle.extensions {
            push(ArtifactKind::Extension, paths.extensions_dir.join(&extension.name));
        }
        if let (Some(_), Some(path)) = (&bundle.server_map, &paths.server_map) {
            push(ArtifactKind::ServerMap, path.clone());
        }
        if let (Some(_), Some(_), Some(path)) = (
            &bundle.managed_block,
            &target.managed_block,
            &paths.managed_document,
        ) {
            push(ArtifactKind::ManagedBlock, path.clone());
        }

        plan
    }

    /// Write `bundle` for `target` under `paths`
    pub fn write(&self, bundle: &Bundle, target: &Target, paths: &TargetPaths) -> Result<SyncReport> {
        let mut report = SyncReport {
            target: target.id.clone(),
            root: paths.root.clone(),
            ..Default::default()
        };

        for prompt in &bundle.prompts {
            let path = prompt_path(paths, &prompt.name);
            let outcome = write_generated(&path, &prompt.content)?;
            report.record(ArtifactKind::Prompt, path, outcome);
        }

        for skill in &bundle.generated_skills {
            let skill_dir = paths.skills_dir.join(&skill.name);
            clear_non_dir(&skill_dir)?;
            let path = skill_dir.join(SKILL_FILE);
            let outcome = write_generated(&path, &skill.content)?;
            report.record(ArtifactKind::GeneratedSkill, path, outcome);
        }

        for dir in &bundle.skill_dirs {
            let path = paths.skills_dir.join(&dir.name);
            let outcome = mirror::mirror_dir(&dir.source_dir, &path, self.options.skill_mode)?;
            report.record(ArtifactKind::SkillDir, path, outcome);
        }

        for extension in &bundle.extensions {
            let path = paths.extensions_dir.join(&extension.name);
            let outcome = write_generated(&path, &extension.content)?;
            report.record(ArtifactKind::Extension, path, outcome);
        }

        if let (Some(map), Some(path)) = (&bundle.server_map, &paths.server_map) {
            let outcome =
                server_map::sync_server_map(path, map.to_json_entries(), &self.options.timestamp)?;
            report.record(ArtifactKind::ServerMap, path.clone(), outcome.write);
            report.backups.extend(outcome.backup);
        }

        if let (Some(body), Some(spec), Some(path)) = (
            &bundle.managed_block,
            &target.managed_block,
            &paths.managed_document,
        ) {
            let outcome = managed_block::sync_managed_block(path, spec, body)?;
            report.record(ArtifactKind::ManagedBlock, path.clone(), outcome);
        }

        Ok(report)
    }
}

fn prompt_path(paths: &TargetPaths, name: &str) -> PathBuf {
    paths.prompts_dir.join(format!("{name}.md"))
}

/// Remove `dir` unless it is a real directory. A skill link left by an
/// earlier run must not be written through into the source tree.
fn clear_non_dir(dir: &Path) -> Result<()> {
    match fs::symlink_metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => {
            debug!(path = %dir.display(), "Replacing stale skill entry");
            remove_entry(dir).map_err(|e| write_error(dir, &e))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(write_error(dir, &err)),
    }
}

/// Generated files are owned outright: always written, newline-terminated
fn write_generated(path: &Path, content: &str) -> Result<WriteOutcome> {
    let existed = path.exists();
    let content = if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{content}\n")
    };
    file_ops::write_file(path, &content, None)?;
    Ok(if existed {
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    })
}
