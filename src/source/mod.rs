//! Source configuration loading
//!
//! Reads a Claude configuration tree (a `~/.claude` home or a plugin
//! directory) into a [`SourceConfig`]:
//! - `commands/**/*.md`
//! - `agents/**/*.md`
//! - `skills/<dir>/SKILL.md`
//! - MCP servers from `.mcp.json` or `settings.json`
//!
//! Missing directories are empty collections. Files that cannot be read or
//! parsed are errors carrying the offending path.

mod mcp;

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::{SourceAgent, SourceCommand, SourceConfig, SourceSkill};
use crate::error::{Result, fs::read_error, source_not_found, source_parse_failed};
use crate::universal::{get_bool, get_str, get_str_list, parse_frontmatter_and_body};

pub use mcp::{load_mcp_servers, mcp_candidates};

const COMMANDS_DIR: &str = "commands";
const AGENTS_DIR: &str = "agents";
const SKILLS_DIR: &str = "skills";
const SKILL_FILE: &str = "SKILL.md";

/// Load the source tree rooted at `root`
pub fn load(root: &Path) -> Result<SourceConfig> {
    if !root.is_dir() {
        return Err(source_not_found(root.display().to_string()));
    }
    let root = dunce::canonicalize(root).map_err(|e| read_error(root, &e))?;

    let config = SourceConfig {
        commands: load_commands(&root)?,
        agents: load_agents(&root)?,
        skills: load_skills(&root)?,
        mcp_servers: load_mcp_servers(&root)?,
        root,
    };

    debug!(
        root = %config.root.display(),
        commands = config.commands.len(),
        agents = config.agents.len(),
        skills = config.skills.len(),
        mcp_servers = config.mcp_servers.len(),
        "Loaded source"
    );
    Ok(config)
}

/// A markdown file split into frontmatter and body
struct Document {
    frontmatter: Value,
    body: String,
}

fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|e| read_error(path, &e))?;

    if let Some((frontmatter, body)) = parse_frontmatter_and_body(&content) {
        return Ok(Document { frontmatter, body });
    }
    if content.lines().next().is_some_and(|line| line.trim() == "---") {
        return Err(source_parse_failed(
            path.display().to_string(),
            "invalid or unterminated frontmatter",
        ));
    }
    Ok(Document {
        frontmatter: Value::Null,
        body: content,
    })
}

/// Markdown files under `root/<dir>`, sorted for a stable source order
fn markdown_files(root: &Path, dir: &str) -> Result<Vec<PathBuf>> {
    let dir_path = root.join(dir);
    if !dir_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir_path).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&dir_path).to_path_buf();
            read_error(&path, &std::io::Error::from(e))
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `workflows/plan.md` -> `workflows:plan`
fn namespaced_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(":")
}

fn load_commands(root: &Path) -> Result<Vec<SourceCommand>> {
    let dir = root.join(COMMANDS_DIR);
    markdown_files(root, COMMANDS_DIR)?
        .into_iter()
        .map(|path| {
            let doc = read_document(&path)?;
            Ok(SourceCommand {
                name: get_str(&doc.frontmatter, "name")
                    .unwrap_or_else(|| namespaced_name(&dir, &path)),
                description: get_str(&doc.frontmatter, "description"),
                argument_hint: get_str(&doc.frontmatter, "argument-hint"),
                disable_model_invocation: get_bool(&doc.frontmatter, "disable-model-invocation")
                    .unwrap_or(false),
                body: doc.body,
            })
        })
        .collect()
}

fn load_agents(root: &Path) -> Result<Vec<SourceAgent>> {
    markdown_files(root, AGENTS_DIR)?
        .into_iter()
        .map(|path| {
            let doc = read_document(&path)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(SourceAgent {
                name: get_str(&doc.frontmatter, "name").unwrap_or(stem),
                description: get_str(&doc.frontmatter, "description"),
                capabilities: get_str_list(&doc.frontmatter, "capabilities"),
                body: doc.body,
            })
        })
        .collect()
}

fn load_skills(root: &Path) -> Result<Vec<SourceSkill>> {
    let skills_dir = root.join(SKILLS_DIR);
    if !skills_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(&skills_dir)
        .map_err(|e| read_error(&skills_dir, &e))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.join(SKILL_FILE).is_file())
        .collect();
    dirs.sort();

    dirs.into_iter()
        .map(|dir| {
            let doc = read_document(&dir.join(SKILL_FILE))?;
            let dir_name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(SourceSkill {
                name: get_str(&doc.frontmatter, "name").unwrap_or(dir_name),
                source_dir: dir,
            })
        })
        .collect()
}
