//! Source model types
//!
//! Everything here is read-only input, constructed once per run by the
//! source loader.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// A slash command definition (`commands/**/*.md`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceCommand {
    /// Raw command name (e.g. `workflows:plan`)
    pub name: String,

    pub description: Option<String>,

    /// Free-form hint shown next to the command in the target UI
    pub argument_hint: Option<String>,

    /// Set for commands meant for manual/UI use only; these are never exported
    pub disable_model_invocation: bool,

    pub body: String,
}

/// A sub-agent definition (`agents/**/*.md`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceAgent {
    pub name: String,
    pub description: Option<String>,
    pub capabilities: Vec<String>,
    pub body: String,
}

/// A skill directory (`skills/<name>/SKILL.md`). Skills are relocated, never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSkill {
    pub name: String,
    pub source_dir: PathBuf,
}

/// One MCP server declaration, keyed by name in [`SourceConfig::mcp_servers`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct McpServerSpec {
    pub command: Option<String>,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub url: Option<String>,
    pub headers: BTreeMap<String, String>,
}

/// How a server is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport<'a> {
    /// Local process started with `command`
    Stdio { command: &'a str },
    /// Remote endpoint at `url`
    Remote { url: &'a str },
}

impl McpServerSpec {
    /// Stdio wins when both are set. `None` means the spec has nothing to translate.
    pub fn transport(&self) -> Option<Transport<'_>> {
        if let Some(command) = self.command.as_deref().filter(|c| !c.is_empty()) {
            return Some(Transport::Stdio { command });
        }
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|url| Transport::Remote { url })
    }
}

/// The complete source configuration for one run
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Directory the configuration was loaded from
    pub root: PathBuf,
    pub commands: Vec<SourceCommand>,
    pub agents: Vec<SourceAgent>,
    pub skills: Vec<SourceSkill>,
    pub mcp_servers: BTreeMap<String, McpServerSpec>,
}

impl SourceConfig {
    /// True if any server env var name looks like it holds a credential
    pub fn has_potential_secrets(&self) -> bool {
        const SENSITIVE: &[&str] = &["key", "token", "secret", "password", "credential"];
        self.mcp_servers.values().any(|server| {
            server.env.keys().any(|key| {
                let key = key.to_lowercase();
                SENSITIVE.iter().any(|pattern| key.contains(pattern))
            })
        })
    }
}
