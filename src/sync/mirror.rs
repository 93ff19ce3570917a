//! Skill directory materialization

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::WriteOutcome;
use super::file_ops::ensure_parent_dir;
use crate::common::fs::{CopyOptions, copy_dir_recursive, remove_entry};
use crate::error::{Result, fs::write_error};

/// How pass-through skill directories land in the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillMode {
    /// Symlink to the source directory
    #[default]
    Symlink,
    /// Recursive copy, `.git` excluded
    Copy,
}

/// Materialize `source` at `dest`, replacing whatever was there.
/// A symlink that already points at `source` is left alone.
pub fn mirror_dir(source: &Path, dest: &Path, mode: SkillMode) -> Result<WriteOutcome> {
    let existed = match fs::symlink_metadata(dest) {
        Ok(metadata) => {
            if mode == SkillMode::Symlink
                && metadata.file_type().is_symlink()
                && fs::read_link(dest).is_ok_and(|current| current == source)
            {
                debug!(dest = %dest.display(), "Skill link already current");
                return Ok(WriteOutcome::Unchanged);
            }
            true
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => return Err(write_error(dest, &err)),
    };

    ensure_parent_dir(dest)?;
    remove_entry(dest).map_err(|e| write_error(dest, &e))?;

    match mode {
        SkillMode::Symlink => symlink_dir(source, dest),
        SkillMode::Copy => copy_dir_recursive(source, dest, &CopyOptions::exclude_git()),
    }
    .map_err(|e| write_error(dest, &e))?;

    debug!(source = %source.display(), dest = %dest.display(), ?mode, "Mirrored skill");
    Ok(if existed {
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    })
}

#[cfg(unix)]
fn symlink_dir(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn symlink_dir(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(source, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn skill_source(temp: &TempDir, name: &str) -> std::path::PathBuf {
        let dir = temp.path().join("source/skills").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), format!("---\nname: {name}\n---\n")).unwrap();
        dir
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_created_then_unchanged() {
        let temp = TempDir::new().unwrap();
        let source = skill_source(&temp, "skill-one");
        let dest = temp.path().join("out/skills/skill-one");

        assert_eq!(
            mirror_dir(&source, &dest, SkillMode::Symlink).unwrap(),
            WriteOutcome::Created
        );
        assert_eq!(fs::read_link(&dest).unwrap(), source);
        assert!(dest.join("SKILL.md").exists());

        assert_eq!(
            mirror_dir(&source, &dest, SkillMode::Symlink).unwrap(),
            WriteOutcome::Unchanged
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_replaces_existing_directory() {
        let temp = TempDir::new().unwrap();
        let source = skill_source(&temp, "skill-one");
        let dest = temp.path().join("out/skills/skill-one");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.md"), "stale").unwrap();

        assert_eq!(
            mirror_dir(&source, &dest, SkillMode::Symlink).unwrap(),
            WriteOutcome::Updated
        );
        assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
        assert!(!dest.join("stale.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_retargets_stale_link() {
        let temp = TempDir::new().unwrap();
        let old = skill_source(&temp, "old");
        let new = skill_source(&temp, "new");
        let dest = temp.path().join("out/skills/s");

        mirror_dir(&old, &dest, SkillMode::Symlink).unwrap();
        mirror_dir(&new, &dest, SkillMode::Symlink).unwrap();

        assert_eq!(fs::read_link(&dest).unwrap(), new);
        assert!(old.join("SKILL.md").exists());
    }

    #[test]
    fn test_copy_mode_skips_git_dir() {
        let temp = TempDir::new().unwrap();
        let source = skill_source(&temp, "skill-one");
        fs::create_dir_all(source.join(".git")).unwrap();
        let dest = temp.path().join("out/skills/skill-one");

        mirror_dir(&source, &dest, SkillMode::Copy).unwrap();

        let metadata = fs::symlink_metadata(&dest).unwrap();
        assert!(metadata.is_dir());
        assert!(dest.join("SKILL.md").exists());
        assert!(!dest.join(".git").exists());
    }

    #[test]
    fn test_skill_mode_deserialize() {
        let mode: SkillMode = serde_yaml::from_str("copy").unwrap();
        assert_eq!(mode, SkillMode::Copy);
        assert_eq!(SkillMode::default(), SkillMode::Symlink);
    }
}
