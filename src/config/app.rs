//! Application configuration (`config.yaml`)
//!
//! ```yaml
//! source: ~/.claude
//! targets:
//!   pi: { root: ~/.pi/agent }
//! rewrite:
//!   reserved_paths: [dev, tmp, etc, usr, var, bin, home]
//! skills:
//!   mode: symlink
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::resolve::{Candidate, Resolution, resolve};
use crate::convert::DEFAULT_RESERVED_PATHS;
use crate::error::{Result, config_invalid, config_parse_failed, file_not_found, fs::read_error};
use crate::sync::SkillMode;
use crate::target::TargetRegistry;

pub const CONFIG_ENV: &str = "AGENTPORT_CONFIG";

/// Per-target overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Output root; `~` is expanded
    pub root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Command-reference tokens that are never rewritten
    pub reserved_paths: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            reserved_paths: DEFAULT_RESERVED_PATHS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillsConfig {
    pub mode: SkillMode,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Source directory; `~` is expanded
    pub source: Option<String>,
    pub targets: BTreeMap<String, TargetConfig>,
    pub rewrite: RewriteConfig,
    pub skills: SkillsConfig,
}

impl AppConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Candidate config files, highest precedence first
    pub fn candidates(flag: Option<PathBuf>) -> Vec<Candidate> {
        vec![
            Candidate::explicit("--config", flag),
            Candidate::explicit(CONFIG_ENV, std::env::var_os(CONFIG_ENV).map(PathBuf::from)),
            Candidate::if_exists(
                "user config",
                dirs::config_dir().map(|dir| dir.join("agentport").join("config.yaml")),
            ),
        ]
    }

    /// Load the configuration. No candidate means defaults; an explicitly
    /// named file that cannot be read is an error.
    pub fn load(flag: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        match resolve(Self::candidates(flag)) {
            Resolution::Found { path, origin } => {
                tracing::debug!(path = %path.display(), origin, "Loading configuration");
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        file_not_found(path.display().to_string())
                    } else {
                        read_error(&path, &e)
                    }
                })?;
                Ok((Self::from_yaml(&content, &path)?, Some(path)))
            }
            Resolution::NotFound => Ok((Self::default(), None)),
        }
    }

    /// Reject target sections for unknown targets
    pub fn validate(&self, registry: &TargetRegistry) -> Result<()> {
        for id in self.targets.keys() {
            if registry.get_by_id(id).is_none() {
                return Err(config_invalid(format!(
                    "unknown target '{id}' in targets section"
                )));
            }
        }
        Ok(())
    }

    /// Configured root for a target, matching ids and aliases
    pub fn target_root(&self, target_id: &str, registry: &TargetRegistry) -> Option<&str> {
        self.targets
            .iter()
            .find(|(id, _)| registry.get_by_id(id).is_some_and(|t| t.id == target_id))
            .and_then(|(_, config)| config.root.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
source: ~/plugins/compound
targets:
  pi:
    root: ~/.pi/agent
  factory:
    root: /tmp/factory
rewrite:
  reserved_paths: [opt]
skills:
  mode: copy
";
        let config = AppConfig::from_yaml(yaml, Path::new("config.yaml")).unwrap();
        assert_eq!(config.source.as_deref(), Some("~/plugins/compound"));
        assert_eq!(config.rewrite.reserved_paths, vec!["opt"]);
        assert_eq!(config.skills.mode, SkillMode::Copy);

        let registry = TargetRegistry::default();
        config.validate(&registry).unwrap();
        assert_eq!(config.target_root("pi", &registry), Some("~/.pi/agent"));
        assert_eq!(config.target_root("droid", &registry), Some("/tmp/factory"));
        assert_eq!(config.target_root("cursor", &registry), None);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml("", Path::new("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.skills.mode, SkillMode::Symlink);
        assert!(config.rewrite.reserved_paths.contains(&"tmp".to_string()));

        let partial = AppConfig::from_yaml("skills: {}\n", Path::new("config.yaml")).unwrap();
        assert_eq!(partial.rewrite, RewriteConfig::default());
    }

    #[test]
    fn test_parse_error_carries_path() {
        let err = AppConfig::from_yaml("targets: [unclosed", Path::new("/etc/agentport.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("/etc/agentport.yaml"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(AppConfig::from_yaml("sauce: x\n", Path::new("c.yaml")).is_err());
    }

    #[test]
    fn test_validate_unknown_target() {
        let config = AppConfig::from_yaml("targets:\n  vscode: {}\n", Path::new("c.yaml")).unwrap();
        let err = config.validate(&TargetRegistry::default()).unwrap_err();
        assert!(err.to_string().contains("vscode"));
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let result = AppConfig::load(Some(PathBuf::from("/definitely/missing/agentport.yaml")));
        assert!(matches!(
            result,
            Err(crate::error::AgentportError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "skills:\n  mode: copy\n").unwrap();

        let (config, loaded_from) = AppConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.skills.mode, SkillMode::Copy);
        assert_eq!(loaded_from, Some(path));
    }
}
