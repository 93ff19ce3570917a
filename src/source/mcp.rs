//! MCP server declarations

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::{Candidate, Resolution, resolve};
use crate::domain::McpServerSpec;
use crate::error::{Result, fs::read_error, source_parse_failed};

const SERVERS_KEY: &str = "mcpServers";
const PROJECT_FILE: &str = ".mcp.json";
const SETTINGS_FILE: &str = "settings.json";

/// Files that may declare MCP servers, first match wins
pub fn mcp_candidates(root: &Path) -> Vec<Candidate> {
    vec![
        Candidate::if_exists(PROJECT_FILE, Some(root.join(PROJECT_FILE))),
        Candidate::if_exists(SETTINGS_FILE, Some(root.join(SETTINGS_FILE))),
    ]
}

/// Load server specs from the first candidate file that exists.
///
/// `{"mcpServers": {...}}` is accepted everywhere; a bare name-to-spec map
/// only in `.mcp.json` (a `settings.json` without the key has no servers).
pub fn load_mcp_servers(root: &Path) -> Result<BTreeMap<String, McpServerSpec>> {
    let Resolution::Found { path, origin } = resolve(mcp_candidates(root)) else {
        return Ok(BTreeMap::new());
    };

    let content = fs::read_to_string(&path).map_err(|e| read_error(&path, &e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| parse_error(&path, e))?;
    let Value::Object(mut document) = value else {
        return Err(parse_error(&path, "expected a JSON object"));
    };

    let servers = match document.remove(SERVERS_KEY) {
        Some(Value::Object(servers)) => servers,
        Some(_) => return Err(parse_error(&path, format!("'{SERVERS_KEY}' is not an object"))),
        None if origin == PROJECT_FILE => document,
        None => Map::new(),
    };

    servers
        .into_iter()
        .map(|(name, spec)| {
            let spec: McpServerSpec = serde_json::from_value(spec)
                .map_err(|e| parse_error(&path, format!("server '{name}': {e}")))?;
            Ok((name, spec))
        })
        .collect()
}

fn parse_error(path: &Path, reason: impl ToString) -> crate::error::AgentportError {
    source_parse_failed(path.display().to_string(), reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::SourceTree;

    #[test]
    fn test_no_mcp_file() {
        let tree = SourceTree::new();
        assert!(load_mcp_servers(tree.path()).unwrap().is_empty());
    }

    #[test]
    fn test_project_file_wins() {
        let tree = SourceTree::new()
            .file(
                ".mcp.json",
                r#"{"mcpServers": {"local": {"command": "echo", "args": ["hi"]}}}"#,
            )
            .file(
                "settings.json",
                r#"{"mcpServers": {"other": {"url": "https://x"}}}"#,
            );
        let servers = load_mcp_servers(tree.path()).unwrap();
        assert_eq!(servers.keys().collect::<Vec<_>>(), vec!["local"]);
        assert_eq!(servers["local"].args, vec!["hi"]);
    }

    #[test]
    fn test_bare_map_in_project_file() {
        let tree = SourceTree::new().file(
            ".mcp.json",
            r#"{"context7": {"type": "http", "url": "https://mcp.context7.com/mcp"}}"#,
        );
        let servers = load_mcp_servers(tree.path()).unwrap();
        assert_eq!(
            servers["context7"].url.as_deref(),
            Some("https://mcp.context7.com/mcp")
        );
    }

    #[test]
    fn test_settings_without_servers() {
        let tree = SourceTree::new().file("settings.json", r#"{"model": "opus", "theme": "dark"}"#);
        assert!(load_mcp_servers(tree.path()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let tree = SourceTree::new().file(".mcp.json", "{nope");
        let err = load_mcp_servers(tree.path()).unwrap_err();
        assert!(err.to_string().contains(".mcp.json"));
    }

    #[test]
    fn test_invalid_server_spec_is_error() {
        let tree = SourceTree::new().file(".mcp.json", r#"{"mcpServers": {"bad": {"args": "x"}}}"#);
        let err = load_mcp_servers(tree.path()).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
