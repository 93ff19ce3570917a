//! Parse and format YAML frontmatter.

use serde_yaml::{Mapping, Value};

/// Parse content into optional YAML frontmatter (between first `---` and second `---`)
/// and body. Returns `None` if no valid frontmatter (missing delimiters or not a mapping).
pub fn parse_frontmatter_and_body(content: &str) -> Option<(Value, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 || lines[0].trim() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim() == "---")?;
    let end_idx = end_idx + 1;
    let frontmatter_str = lines[1..end_idx].join("\n");
    let body = lines[end_idx + 1..].join("\n");
    let value: Value = serde_yaml::from_str(&frontmatter_str).ok()?;
    if value.as_mapping().is_none() && !value.is_null() {
        return None;
    }
    Some((value, body))
}

/// Format a document with a frontmatter header built from `fields`.
///
/// Fields whose value is absent or empty are omitted. With no remaining
/// fields the body is returned unchanged.
pub fn format_frontmatter(fields: &[(&str, Option<&str>)], body: &str) -> String {
    let mut mapping = Mapping::new();
    for &(key, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            mapping.insert(
                Value::String(key.to_string()),
                Value::String(value.to_string()),
            );
        }
    }

    if mapping.is_empty() {
        return body.to_string();
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(mapping)).unwrap_or_default();
    format!("---\n{}\n---\n\n{body}", yaml.trim_end())
}

/// Get a string value from a frontmatter Value by key (top-level).
pub fn get_str(value: &Value, key: &str) -> Option<String> {
    let mapping = value.as_mapping()?;
    let v = mapping.get(Value::String(key.to_string()))?;
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Get a boolean flag; accepts YAML booleans and the strings `true`/`false`.
pub fn get_bool(value: &Value, key: &str) -> Option<bool> {
    let mapping = value.as_mapping()?;
    match mapping.get(Value::String(key.to_string()))? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Get a list of strings. A comma-separated string is split into items.
pub fn get_str_list(value: &Value, key: &str) -> Vec<String> {
    let Some(mapping) = value.as_mapping() else {
        return Vec::new();
    };
    match mapping.get(Value::String(key.to_string())) {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
