//! Target registry
//!
//! This module provides:
//! - Target registration and lookup (with aliases)
//! - Default target definitions

use std::collections::HashMap;

use super::{Target, pi};
use crate::error::{Result, target_not_supported};

/// Registry of all supported targets
#[derive(Debug)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    by_id: HashMap<String, usize>,
}

impl TargetRegistry {
    /// Create a new registry with the given targets
    pub fn new(targets: Vec<Target>) -> Self {
        let by_id: HashMap<String, usize> = targets
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id.clone(), idx))
            .collect();

        Self { targets, by_id }
    }

    /// Get a target by its ID
    pub fn get_by_id(&self, id: &str) -> Option<&Target> {
        let id = id.trim().to_lowercase();

        if let Some(&idx) = self.by_id.get(&id) {
            return self.targets.get(idx);
        }

        // Handle aliases
        let alias_id = match id.as_str() {
            "factory" => "droid",
            "cursor-ai" => "cursor",
            "pi-agent" => "pi",
            _ => return None,
        };

        self.by_id
            .get(alias_id)
            .and_then(|&idx| self.targets.get(idx))
    }

    /// Resolve requested ids (with `all` meaning every target), preserving
    /// request order and dropping duplicates
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<Target>> {
        if ids.iter().any(|id| id.eq_ignore_ascii_case("all")) {
            return Ok(self.targets.clone());
        }

        let mut resolved: Vec<Target> = Vec::new();
        for id in ids {
            let target = self.get_by_id(id).ok_or_else(|| target_not_supported(id))?;
            if !resolved.iter().any(|t| t.id == target.id) {
                resolved.push(target.clone());
            }
        }
        Ok(resolved)
    }

    /// Get all targets in the registry
    pub fn all(&self) -> &[Target] {
        &self.targets
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new(default_targets())
    }
}

/// Get default target definitions
pub fn default_targets() -> Vec<Target> {
    vec![
        pi::target(),
        // Cursor
        Target::new("cursor", "Cursor", ".cursor").with_server_map("mcp.json", "url"),
        // Factory Droid
        Target::new("droid", "Factory Droid", ".factory"),
    ]
}
