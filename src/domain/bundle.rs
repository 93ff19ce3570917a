//! Target bundle types
//!
//! A [`Bundle`] is everything produced for one target before it is written
//! to disk. It is built fresh per target, per run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

/// A file whose full content is generated (prompt or skill)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub name: String,
    pub content: String,
}

/// A skill directory materialized verbatim under the target's skills dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughDir {
    pub name: String,
    pub source_dir: PathBuf,
}

/// Static payload written as-is (never rewritten)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFile {
    pub name: String,
    pub content: String,
}

/// One translated server entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEntry {
    pub command: Option<String>,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// Remote endpoint; serialized under the target's remote field name
    pub endpoint: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl ServerEntry {
    /// JSON shape of this entry. Empty collections are omitted.
    pub fn to_json(&self, remote_field: &str) -> Value {
        let mut obj = Map::new();
        if let Some(command) = &self.command {
            obj.insert("command".to_string(), Value::String(command.clone()));
        }
        if !self.args.is_empty() {
            obj.insert(
                "args".to_string(),
                Value::Array(self.args.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.env.is_empty() {
            obj.insert("env".to_string(), string_map(&self.env));
        }
        if let Some(endpoint) = &self.endpoint {
            obj.insert(remote_field.to_string(), Value::String(endpoint.clone()));
        }
        if !self.headers.is_empty() {
            obj.insert("headers".to_string(), string_map(&self.headers));
        }
        Value::Object(obj)
    }
}

fn string_map(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Target-specific MCP server map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerMap {
    /// Field name the target uses for remote endpoints (`url`, `baseUrl`, ...)
    pub remote_field: String,
    pub servers: BTreeMap<String, ServerEntry>,
}

impl ServerMap {
    /// Entries as a JSON object keyed by server name
    pub fn to_json_entries(&self) -> Map<String, Value> {
        self.servers
            .iter()
            .map(|(name, entry)| (name.clone(), entry.to_json(&self.remote_field)))
            .collect()
    }
}

/// Everything generated for one target
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Target id this bundle was assembled for
    pub target: String,
    pub prompts: Vec<GeneratedArtifact>,
    pub generated_skills: Vec<GeneratedArtifact>,
    pub skill_dirs: Vec<PassthroughDir>,
    pub extensions: Vec<ExtensionFile>,
    pub server_map: Option<ServerMap>,
    /// Body of the managed instructions block, if the target has one
    pub managed_block: Option<String>,
}

impl Bundle {
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
            && self.generated_skills.is_empty()
            && self.skill_dirs.is_empty()
            && self.extensions.is_empty()
            && self.server_map.is_none()
            && self.managed_block.is_none()
    }
}
