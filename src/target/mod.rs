//! Sync target definitions
//!
//! This module handles:
//! - Target definitions (Target, Capabilities, Vocabulary, Layout)
//! - Target registration and lookup (via TargetRegistry)
//! - Resolving a target's on-disk layout under an output root

use std::path::{Path, PathBuf};

use crate::domain::ExtensionFile;

pub use registry::{TargetRegistry, default_targets};

pub mod pi;
pub mod registry;

/// Which generated artifact classes a target accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Commands become prompt files
    pub prompts: bool,
    /// Agents become generated skills
    pub generated_skills: bool,
}

/// Target-tool replacements for source-tool vocabulary in instruction bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Agent invocation template; `{agent}` and `{task}` are substituted
    pub subagent_template: &'static str,
    /// Replacement for the "ask the user a question" tool
    pub ask_question: &'static str,
    /// Replacement for the "write todo list" tool
    pub todo_write: &'static str,
    /// Replacement for the "read todo list" tool
    pub todo_read: &'static str,
    /// Note appended to bodies that mention MCP
    pub mcp_note: &'static str,
}

/// Where and how a target stores its MCP server map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMapSpec {
    /// Path relative to the resolved config dir
    pub file: &'static str,
    /// Field name used for remote endpoints
    pub remote_field: &'static str,
}

/// A marker-delimited region this system owns inside a target document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlockSpec {
    /// File name relative to the output root
    pub file: &'static str,
    pub begin: &'static str,
    pub end: &'static str,
    pub body: &'static str,
}

/// How the target's directories hang off the output root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Everything directly under the root
    Flat,
    /// Directly under the root if its final component is one of `roots`,
    /// otherwise nested under `<root>/<nest>`
    NestUnlessRoot {
        roots: &'static [&'static str],
        nest: &'static str,
    },
}

/// Concrete paths for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub root: PathBuf,
    pub skills_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub extensions_dir: PathBuf,
    pub server_map: Option<PathBuf>,
    pub managed_document: Option<PathBuf>,
}

/// A supported sync target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Target identifier (e.g., "pi", "cursor")
    pub id: String,

    /// Display name for the target
    pub name: String,

    /// Default output root, relative to the home directory
    pub default_root: String,

    pub layout: Layout,

    pub capabilities: Capabilities,

    pub vocabulary: Option<Vocabulary>,

    pub server_map: Option<ServerMapSpec>,

    pub managed_block: Option<ManagedBlockSpec>,

    /// Static payload files written to the extensions dir
    pub extensions: Vec<ExtensionFile>,
}

impl Target {
    /// Create a new target that only mirrors skills
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        default_root: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_root: default_root.into(),
            layout: Layout::Flat,
            capabilities: Capabilities::default(),
            vocabulary: None,
            server_map: None,
            managed_block: None,
            extensions: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable prompts and generated skills, rewriting bodies with `vocabulary`
    pub fn with_generation(mut self, vocabulary: Vocabulary) -> Self {
        self.capabilities = Capabilities {
            prompts: true,
            generated_skills: true,
        };
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn with_server_map(mut self, file: &'static str, remote_field: &'static str) -> Self {
        self.server_map = Some(ServerMapSpec { file, remote_field });
        self
    }

    pub fn with_managed_block(mut self, spec: ManagedBlockSpec) -> Self {
        self.managed_block = Some(spec);
        self
    }

    pub fn with_extension(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.extensions.push(ExtensionFile {
            name: name.into(),
            content: content.into(),
        });
        self
    }

    /// Default output root under `home`
    pub fn default_root_in(&self, home: &Path) -> PathBuf {
        home.join(&self.default_root)
    }

    /// Resolve the on-disk layout for an output root
    pub fn resolve_paths(&self, root: &Path) -> TargetPaths {
        let base = match self.layout {
            Layout::Flat => root.to_path_buf(),
            Layout::NestUnlessRoot { roots, nest } => {
                let is_root = root
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| roots.contains(&n));
                if is_root {
                    root.to_path_buf()
                } else {
                    root.join(nest)
                }
            }
        };

        TargetPaths {
            root: root.to_path_buf(),
            skills_dir: base.join("skills"),
            prompts_dir: base.join("prompts"),
            extensions_dir: base.join("extensions"),
            server_map: self.server_map.as_ref().map(|spec| base.join(spec.file)),
            managed_document: self.managed_block.as_ref().map(|spec| root.join(spec.file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_new() {
        let target = Target::new("droid", "Factory Droid", ".factory");
        assert_eq!(target.id, "droid");
        assert_eq!(target.layout, Layout::Flat);
        assert!(!target.capabilities.prompts);
        assert!(target.server_map.is_none());
    }

    #[test]
    fn test_flat_layout_paths() {
        let target = Target::new("cursor", "Cursor", ".cursor").with_server_map("mcp.json", "url");
        let paths = target.resolve_paths(Path::new("/home/u/.cursor"));
        assert_eq!(paths.skills_dir, PathBuf::from("/home/u/.cursor/skills"));
        assert_eq!(
            paths.server_map,
            Some(PathBuf::from("/home/u/.cursor/mcp.json"))
        );
        assert_eq!(paths.managed_document, None);
    }

    #[test]
    fn test_nested_layout_paths() {
        let target = Target::new("x", "X", ".x").with_layout(Layout::NestUnlessRoot {
            roots: &["agent", ".x"],
            nest: ".x",
        });

        let direct = target.resolve_paths(Path::new("/home/u/.x/agent"));
        assert_eq!(direct.prompts_dir, PathBuf::from("/home/u/.x/agent/prompts"));

        let dot = target.resolve_paths(Path::new("/proj/.x"));
        assert_eq!(dot.skills_dir, PathBuf::from("/proj/.x/skills"));

        let nested = target.resolve_paths(Path::new("/proj"));
        assert_eq!(nested.skills_dir, PathBuf::from("/proj/.x/skills"));
        assert_eq!(nested.root, PathBuf::from("/proj"));
    }
}
