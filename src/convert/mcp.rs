//! MCP server spec translation

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{McpServerSpec, ServerEntry, ServerMap, Transport};

/// Translate source server specs 1:1 into a target server map.
///
/// A stdio spec keeps `command`, `args`, `env` and `headers`. A remote spec
/// puts its url under `remote_field` and keeps `headers`. Specs with
/// neither are dropped.
pub fn translate_servers(
    servers: &BTreeMap<String, McpServerSpec>,
    remote_field: &str,
) -> ServerMap {
    let mut translated = BTreeMap::new();

    for (name, spec) in servers {
        let entry = match spec.transport() {
            Some(Transport::Stdio { command }) => ServerEntry {
                command: Some(command.to_string()),
                args: spec.args.clone(),
                env: spec.env.clone(),
                endpoint: None,
                headers: spec.headers.clone(),
            },
            Some(Transport::Remote { url }) => ServerEntry {
                endpoint: Some(url.to_string()),
                headers: spec.headers.clone(),
                ..Default::default()
            },
            None => {
                debug!(server = %name, "Dropping MCP server without command or url");
                continue;
            }
        };
        translated.insert(name.clone(), entry);
    }

    ServerMap {
        remote_field: remote_field.to_string(),
        servers: translated,
    }
}
