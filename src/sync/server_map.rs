//! MCP server map merge
//!
//! The target file is a JSON object with an `mcpServers` object. New entries
//! overwrite entries of the same name, every other key (inside and outside
//! `mcpServers`) is kept. An existing file is backed up before it is
//! overwritten.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use super::WriteOutcome;
use super::file_ops::{PRIVATE_FILE_MODE, backup_file, read_if_exists, write_file};
use crate::error::{Result, invalid_server_map};

pub const SERVERS_KEY: &str = "mcpServers";

/// What happened to a server map file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMapOutcome {
    pub write: WriteOutcome,
    pub backup: Option<PathBuf>,
}

/// Shallow merge: only top-level keys from new object override existing
fn merge_json_shallow(existing: &mut Map<String, Value>, new: Map<String, Value>) {
    for (key, value) in new {
        existing.insert(key, value);
    }
}

/// Merge `entries` into the document `existing` (absent means empty)
pub fn merge_server_map(
    path: &Path,
    existing: Option<&str>,
    entries: Map<String, Value>,
) -> Result<Value> {
    let mut document = match existing {
        None => Map::new(),
        Some(content) if content.trim().is_empty() => Map::new(),
        Some(content) => match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(invalid_server_map(
                    path.display().to_string(),
                    "top-level value is not an object",
                ));
            }
            Err(e) => {
                return Err(invalid_server_map(path.display().to_string(), e.to_string()));
            }
        },
    };

    let servers = document
        .entry(SERVERS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if servers.is_null() {
        *servers = Value::Object(Map::new());
    }
    let Value::Object(servers) = servers else {
        return Err(invalid_server_map(
            path.display().to_string(),
            format!("'{SERVERS_KEY}' is not an object"),
        ));
    };
    merge_json_shallow(servers, entries);

    Ok(Value::Object(document))
}

/// Merge `entries` into the server map at `path` and write it owner-only.
///
/// An existing file is copied to `<name>.bak.<timestamp>` first. Nothing is
/// written (and no backup taken) when the merged document is unchanged.
pub fn sync_server_map(
    path: &Path,
    entries: Map<String, Value>,
    timestamp: &str,
) -> Result<ServerMapOutcome> {
    let existing = read_if_exists(path)?;
    let merged = merge_server_map(path, existing.content(), entries)?;
    let mut content = serde_json::to_string_pretty(&merged)?;
    content.push('\n');

    if existing.content() == Some(content.as_str()) {
        return Ok(ServerMapOutcome {
            write: WriteOutcome::Unchanged,
            backup: None,
        });
    }

    let backup = if existing.exists() {
        let backup = backup_file(path, timestamp)?;
        info!(path = %path.display(), backup = %backup.display(), "Backed up server map");
        Some(backup)
    } else {
        None
    };

    write_file(path, &content, Some(PRIVATE_FILE_MODE))?;

    Ok(ServerMapOutcome {
        write: if existing.exists() {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Created
        },
        backup,
    })
}
