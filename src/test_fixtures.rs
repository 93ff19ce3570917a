//! Test fixtures for building Claude source trees on the fly.
//!
//! ```ignore
//! let tree = SourceTree::new()
//!     .file("commands/workflows/plan.md", "---\ndescription: Plan\n---\nBody")
//!     .file(".mcp.json", r#"{"mcpServers": {}}"#);
//! let config = crate::source::load(tree.path())?;
//! ```

#![allow(clippy::expect_used)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Absolute base for temp dirs, so a relative `TMPDIR` never lands them
/// under the current working directory.
fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// A throwaway source tree; removed on drop
pub struct SourceTree {
    temp: TempDir,
}

impl SourceTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp: create_temp_dir(),
        }
    }

    /// Add a file at `relative`, creating parent directories
    #[must_use]
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tree_writes_files() {
        let tree = SourceTree::new().file("skills/a/SKILL.md", "skill");
        assert!(tree.path().is_absolute());
        assert_eq!(
            fs::read_to_string(tree.path().join("skills/a/SKILL.md")).unwrap(),
            "skill"
        );
    }
}
