//! Common test utilities for agentport integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A plugin-style Claude source tree with one of everything
pub const PLAN_COMMAND: &str = "---
description: Plan a feature
argument-hint: \"[feature]\"
---
Research first.

- Task repo-research-analyst(feature   description)

Ask with AskUserQuestion. Then run /workflows:work.
";

pub const SETUP_COMMAND: &str = "---
description: Configure the plugin
disable-model-invocation: true
---
Interactive setup.
";

pub const SENTINEL_AGENT: &str = "---
description: Security audits
capabilities:
  - audit code
  - report findings
---
Check for vulnerabilities.
";

pub const TODOS_SKILL: &str = "---
name: file-todos
description: File based todo tracking
---
Keep todos in todos/.
";

pub const MCP_JSON: &str = r#"{
  "mcpServers": {
    "context7": {"type": "http", "url": "https://mcp.context7.com/mcp"},
    "local": {"command": "echo", "args": ["hello"]}
  }
}"#;

/// An isolated HOME plus a source tree
pub struct TestEnv {
    pub temp: TempDir,
    /// Used as HOME for the binary
    pub home: PathBuf,
    /// Claude source directory passed with --source
    pub source: PathBuf,
}

impl TestEnv {
    /// Empty HOME and empty source directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let source = temp.path().join("plugin");
        fs::create_dir_all(&home).expect("Failed to create home directory");
        fs::create_dir_all(&source).expect("Failed to create source directory");
        Self { temp, home, source }
    }

    /// Source tree with commands, an agent, a skill and MCP servers
    pub fn with_plugin() -> Self {
        let env = Self::new();
        env.write_source("commands/workflows/plan.md", PLAN_COMMAND);
        env.write_source("commands/setup.md", SETUP_COMMAND);
        env.write_source("agents/review/security-sentinel.md", SENTINEL_AGENT);
        env.write_source("skills/file-todos/SKILL.md", TODOS_SKILL);
        env.write_source(".mcp.json", MCP_JSON);
        env
    }

    pub fn write_source(&self, relative: &str, content: &str) {
        write(&self.source.join(relative), content);
    }

    pub fn write_home(&self, relative: &str, content: &str) {
        write(&self.home.join(relative), content);
    }

    pub fn read_home(&self, relative: &str) -> String {
        fs::read_to_string(self.home.join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    pub fn home_exists(&self, relative: &str) -> bool {
        self.home.join(relative).exists()
    }

    /// The agentport binary with HOME pointed at the test home and every
    /// agentport environment override cleared
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("agentport").expect("agentport binary should be built");
        cmd.env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env_remove("AGENTPORT_CONFIG")
            .env_remove("AGENTPORT_SOURCE")
            .env_remove("RUST_LOG")
            .env_remove("CLICOLOR_FORCE")
            .env("NO_COLOR", "1");
        cmd
    }

    /// `agentport sync --source <source> --to <targets...>`
    pub fn sync(&self, targets: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("sync")
            .arg("--source")
            .arg(&self.source)
            .arg("--to")
            .args(targets);
        cmd
    }

    /// Files under `dir` (relative to HOME) whose name contains `.bak.`
    pub fn backups_in(&self, dir: &str) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.home.join(dir)) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains(".bak."))
            })
            .collect()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}
