//! Bundle assembly
//!
//! Turns the source model into the [`Bundle`] for one target. Name claims go
//! through a [`NameRegistry`] owned by a single [`Assembler::assemble`] call:
//! skill directory names are reserved first, then commands claim names in
//! source order, then agents.

use tracing::{debug, warn};

use super::mcp::translate_servers;
use super::names::{NameRegistry, is_valid_skill_name, normalize_name};
use super::rewrite::Rewriter;
use crate::common::string_utils::collapse_whitespace;
use crate::domain::{
    Bundle, GeneratedArtifact, PassthroughDir, SourceAgent, SourceCommand, SourceConfig,
};
use crate::target::Target;
use crate::universal::format_frontmatter;

/// Longest description a generated skill may carry, ellipsis included
pub const MAX_DESCRIPTION_LEN: usize = 1024;

const ELLIPSIS: &str = "...";

/// Collapse whitespace and clamp to [`MAX_DESCRIPTION_LEN`] characters
pub fn clamp_description(raw: &str) -> String {
    let normalized = collapse_whitespace(raw);
    if normalized.chars().count() <= MAX_DESCRIPTION_LEN {
        return normalized;
    }

    let keep = MAX_DESCRIPTION_LEN - ELLIPSIS.len();
    let truncated: String = normalized.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", truncated.trim_end())
}

/// Builds bundles for one target
#[derive(Debug)]
pub struct Assembler<'a> {
    target: &'a Target,
    rewriter: Option<Rewriter>,
}

impl<'a> Assembler<'a> {
    pub fn new<I, S>(target: &'a Target, reserved_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rewriter = target
            .vocabulary
            .as_ref()
            .map(|vocabulary| Rewriter::new(vocabulary, reserved_paths));
        if let Some(rewriter) = &rewriter {
            debug!(target = %target.id, rules = ?rewriter.rule_names(), "Rewrite chain");
        }
        Self { target, rewriter }
    }

    pub fn assemble(&self, source: &SourceConfig) -> Bundle {
        let mut registry = NameRegistry::new();
        let mut bundle = Bundle {
            target: self.target.id.clone(),
            ..Default::default()
        };

        for skill in &source.skills {
            if !is_valid_skill_name(&skill.name) {
                warn!(skill = %skill.name, "Skipping skill with unsafe name");
                continue;
            }
            registry.reserve(&normalize_name(&skill.name));
            bundle.skill_dirs.push(PassthroughDir {
                name: skill.name.clone(),
                source_dir: skill.source_dir.clone(),
            });
        }

        if let Some(rewriter) = &self.rewriter {
            if self.target.capabilities.prompts {
                for command in &source.commands {
                    if command.disable_model_invocation {
                        debug!(command = %command.name, "Skipping manual-only command");
                        continue;
                    }
                    bundle
                        .prompts
                        .push(convert_command(command, rewriter, &mut registry));
                }
            }

            if self.target.capabilities.generated_skills {
                for agent in &source.agents {
                    bundle
                        .generated_skills
                        .push(convert_agent(agent, &mut registry));
                }
            }
        }

        bundle.extensions = self.target.extensions.clone();

        if let Some(spec) = &self.target.server_map {
            let map = translate_servers(&source.mcp_servers, spec.remote_field);
            if !map.servers.is_empty() {
                bundle.server_map = Some(map);
            }
        }

        bundle.managed_block = self
            .target
            .managed_block
            .as_ref()
            .map(|spec| spec.body.to_string());

        bundle
    }
}

fn convert_command(
    command: &SourceCommand,
    rewriter: &Rewriter,
    registry: &mut NameRegistry,
) -> GeneratedArtifact {
    let name = registry.claim(&normalize_name(&command.name));
    let body = rewriter.rewrite(&command.body);
    let content = format_frontmatter(
        &[
            ("description", command.description.as_deref()),
            ("argument-hint", command.argument_hint.as_deref()),
        ],
        body.trim(),
    );
    GeneratedArtifact { name, content }
}

fn convert_agent(agent: &SourceAgent, registry: &mut NameRegistry) -> GeneratedArtifact {
    let name = registry.claim(&normalize_name(&agent.name));
    let description = clamp_description(
        agent
            .description
            .as_deref()
            .unwrap_or(&format!("Converted from Claude agent {}", agent.name)),
    );

    let mut sections = Vec::new();
    if !agent.capabilities.is_empty() {
        let bullets: Vec<String> = agent
            .capabilities
            .iter()
            .map(|capability| format!("- {capability}"))
            .collect();
        sections.push(format!("## Capabilities\n{}", bullets.join("\n")));
    }
    let body = agent.body.trim();
    if body.is_empty() {
        sections.push(format!("Instructions converted from the {} agent.", agent.name));
    } else {
        sections.push(body.to_string());
    }

    let content = format_frontmatter(
        &[
            ("name", Some(name.as_str())),
            ("description", Some(description.as_str())),
        ],
        &sections.join("\n\n"),
    );
    GeneratedArtifact { name, content }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;
    use crate::convert::rewrite::DEFAULT_RESERVED_PATHS;
    use crate::domain::{McpServerSpec, SourceSkill};
    use crate::target::TargetRegistry;

    fn assemble(target_id: &str, source: &SourceConfig) -> Bundle {
        let registry = TargetRegistry::default();
        let target = registry.get_by_id(target_id).unwrap();
        Assembler::new(target, DEFAULT_RESERVED_PATHS.iter().copied()).assemble(source)
    }

    fn command(name: &str, body: &str) -> SourceCommand {
        SourceCommand {
            name: name.to_string(),
            description: Some(format!("{name} command")),
            body: body.to_string(),
            ..Default::default()
        }
    }

    fn skill(name: &str) -> SourceSkill {
        SourceSkill {
            name: name.to_string(),
            source_dir: PathBuf::from("/src/skills").join(name),
        }
    }

    #[test]
    fn test_clamp_description() {
        assert_eq!(clamp_description("  a\n  b\tc "), "a b c");

        let long = "word ".repeat(400);
        let clamped = clamp_description(&long);
        assert!(clamped.chars().count() <= MAX_DESCRIPTION_LEN);
        assert!(clamped.ends_with("..."));

        let exact = "x".repeat(MAX_DESCRIPTION_LEN);
        assert_eq!(clamp_description(&exact), exact);
        let over = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(clamp_description(&over).chars().count(), MAX_DESCRIPTION_LEN);
    }

    #[test]
    fn test_command_becomes_prompt() {
        let source = SourceConfig {
            commands: vec![SourceCommand {
                argument_hint: Some("[FILE]".to_string()),
                ..command("workflows:plan", "Plan it.\n\nTask repo-research(x)\n")
            }],
            ..Default::default()
        };
        let bundle = assemble("pi", &source);
        assert_eq!(bundle.prompts.len(), 1);
        let prompt = &bundle.prompts[0];
        assert_eq!(prompt.name, "workflows-plan");
        assert!(prompt.content.starts_with("---\n"));
        assert!(prompt.content.contains("workflows:plan command"));
        assert!(prompt.content.contains("argument-hint:"));
        assert!(prompt.content.contains("[FILE]"));
        assert!(prompt.content.ends_with(
            "Plan it.\n\nRun subagent with agent=\"repo-research\" and task=\"x\"."
        ));
    }

    #[test]
    fn test_disabled_commands_are_excluded() {
        let source = SourceConfig {
            commands: vec![
                SourceCommand {
                    disable_model_invocation: true,
                    ..command("setup", "Task x(y) mentions MCP")
                },
                command("plan", "Plan"),
            ],
            ..Default::default()
        };
        let bundle = assemble("pi", &source);
        let names: Vec<_> = bundle.prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["plan"]);
    }

    #[test]
    fn test_skill_takes_priority_over_command() {
        let source = SourceConfig {
            commands: vec![command("Plan", "a"), command("plan", "b")],
            skills: vec![skill("plan")],
            ..Default::default()
        };
        let bundle = assemble("pi", &source);
        assert_eq!(bundle.skill_dirs[0].name, "plan");
        let names: Vec<_> = bundle.prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["plan-2", "plan-3"]);
    }

    #[test]
    fn test_agent_names_share_registry_with_commands() {
        let source = SourceConfig {
            commands: vec![command("review", "")],
            agents: vec![SourceAgent {
                name: "review".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let bundle = assemble("pi", &source);
        assert_eq!(bundle.prompts[0].name, "review");
        assert_eq!(bundle.generated_skills[0].name, "review-2");
    }

    #[test]
    fn test_agent_skill_content() {
        let source = SourceConfig {
            agents: vec![
                SourceAgent {
                    name: "Security Sentinel".to_string(),
                    description: Some("Finds\n  vulns".to_string()),
                    capabilities: vec!["audit".to_string(), "report".to_string()],
                    body: "\nReview code.\n".to_string(),
                },
                SourceAgent {
                    name: "blank".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let bundle = assemble("pi", &source);

        let first = &bundle.generated_skills[0];
        assert_eq!(first.name, "security-sentinel");
        assert_eq!(
            first.content,
            "---\nname: security-sentinel\ndescription: Finds vulns\n---\n\n## Capabilities\n- audit\n- report\n\nReview code."
        );

        let second = &bundle.generated_skills[1];
        assert!(second.content.contains("description: Converted from Claude agent blank"));
        assert!(second.content.ends_with("Instructions converted from the blank agent."));
    }

    #[test]
    fn test_unsafe_skill_names_skipped() {
        let source = SourceConfig {
            skills: vec![skill("ok"), skill("../escape"), skill("..")],
            ..Default::default()
        };
        let bundle = assemble("droid", &source);
        let names: Vec<_> = bundle.skill_dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_skills_only_targets_ignore_commands_and_agents() {
        let source = SourceConfig {
            commands: vec![command("plan", "x")],
            agents: vec![SourceAgent {
                name: "a".to_string(),
                ..Default::default()
            }],
            skills: vec![skill("s")],
            ..Default::default()
        };
        for id in ["cursor", "droid"] {
            let bundle = assemble(id, &source);
            assert!(bundle.prompts.is_empty());
            assert!(bundle.generated_skills.is_empty());
            assert!(bundle.extensions.is_empty());
            assert!(bundle.managed_block.is_none());
            assert_eq!(bundle.skill_dirs.len(), 1);
        }
    }

    #[test]
    fn test_server_map_per_target() {
        let source = SourceConfig {
            mcp_servers: BTreeMap::from([(
                "context7".to_string(),
                McpServerSpec {
                    url: Some("https://mcp.context7.com/mcp".to_string()),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };

        let pi = assemble("pi", &source);
        assert_eq!(pi.server_map.as_ref().unwrap().remote_field, "baseUrl");
        assert_eq!(pi.extensions.len(), 1);
        assert!(pi.managed_block.is_some());

        let cursor = assemble("cursor", &source);
        assert_eq!(cursor.server_map.as_ref().unwrap().remote_field, "url");

        assert!(assemble("droid", &source).server_map.is_none());
    }

    #[test]
    fn test_no_server_map_without_translatable_servers() {
        let source = SourceConfig {
            mcp_servers: BTreeMap::from([("empty".to_string(), McpServerSpec::default())]),
            ..Default::default()
        };
        assert!(assemble("cursor", &source).server_map.is_none());
    }
}
