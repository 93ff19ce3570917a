//! Low-level file effects used by the sync writer
//!
//! This module handles:
//! - Reading target-owned files, distinguishing absent from unreadable
//! - Writing files (optionally owner-only)
//! - Timestamped backups

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, fs::read_error, fs::write_error};

/// Permissions for files that may carry credentials
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Result of reading a file that may legitimately not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    Absent,
    Present(String),
}

impl FileState {
    pub fn content(&self) -> Option<&str> {
        match self {
            FileState::Absent => None,
            FileState::Present(content) => Some(content),
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, FileState::Present(_))
    }
}

/// Read `path`. Not-found is [`FileState::Absent`]; every other failure is an error.
pub fn read_if_exists(path: &Path) -> Result<FileState> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(FileState::Present(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileState::Absent),
        Err(err) => Err(read_error(path, &err)),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, &e))?;
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
///
/// With `mode` set (unix only) the file is created with, or narrowed to,
/// those permissions.
pub fn write_file(path: &Path, content: &str, mode: Option<u32>) -> Result<()> {
    ensure_parent_dir(path)?;
    write_with_mode(path, content, mode).map_err(|e| write_error(path, &e))?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

#[cfg(unix)]
fn write_with_mode(path: &Path, content: &str, mode: Option<u32>) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let Some(mode) = mode else {
        return fs::write(path, content);
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    // `mode` only applies on creation
    file.set_permissions(fs::Permissions::from_mode(mode))?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_with_mode(path: &Path, content: &str, _mode: Option<u32>) -> io::Result<()> {
    fs::write(path, content)
}

/// Path of the backup for `path` taken at `timestamp`: `<name>.bak.<timestamp>`
pub fn backup_path(path: &Path, timestamp: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".bak.{timestamp}"));
    path.with_file_name(name)
}

/// Copy `path` to its backup location, preserving permissions
pub fn backup_file(path: &Path, timestamp: &str) -> Result<PathBuf> {
    let backup = backup_path(path, timestamp);
    fs::copy(path, &backup).map_err(|e| write_error(&backup, &e))?;
    Ok(backup)
}
