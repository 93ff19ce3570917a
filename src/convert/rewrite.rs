//! Instruction body rewriting
//!
//! A [`Rewriter`] is an ordered chain of [`RewriteRule`]s. Each rule is a
//! pure text transform whose output feeds the next one, so the order in
//! [`Rewriter::new`] is significant:
//!
//! 1. [`AgentInvocation`]: `Task name(args)` lines become subagent calls
//! 2. [`ToolNames`]: source-tool primitives become target-tool primitives
//! 3. [`CommandReferences`]: `/namespace:command` references are normalized
//! 4. [`CompatibilityNote`]: a note is appended to bodies that mention MCP
//!
//! Rules 1-3 are idempotent on their own output. Rule 4 is not, so a body
//! must go through [`Rewriter::rewrite`] exactly once.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::names::normalize_name;
use crate::common::string_utils::collapse_whitespace;
use crate::target::Vocabulary;

/// Tokens that look like absolute-path segments rather than commands
pub const DEFAULT_RESERVED_PATHS: &[&str] = &["dev", "tmp", "etc", "usr", "var", "bin", "home"];

static TASK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*-?[ \t]*)Task[ \t]+([a-z][a-z0-9-]*)\(([^)\n]+)\)")
        .expect("Invalid regex pattern")
});

static ASK_QUESTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAskUserQuestion\b").expect("Invalid regex pattern"));

static TODO_WRITE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTodoWrite\b").expect("Invalid regex pattern"));

static TODO_READ_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTodoRead\b").expect("Invalid regex pattern"));

// The regex crate has no lookaround; the boundaries around a match are
// checked by hand in `CommandReferences::apply`.
static COMMAND_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([a-z][A-Za-z0-9_:-]*)").expect("Invalid regex pattern"));

static MCP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmcp\b").expect("Invalid regex pattern"));

/// A single text transform in the rewrite chain
pub trait RewriteRule: Debug + Send + Sync {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str) -> String;
}

/// `Task agent-name(arguments)` at the start of a line, optionally behind a
/// list marker
#[derive(Debug, Clone)]
pub struct AgentInvocation {
    template: &'static str,
}

impl AgentInvocation {
    /// `template` carries `{agent}` and `{task}` placeholders
    pub fn new(template: &'static str) -> Self {
        Self { template }
    }
}

impl RewriteRule for AgentInvocation {
    fn name(&self) -> &'static str {
        "agent-invocation"
    }

    fn apply(&self, text: &str) -> String {
        TASK_REGEX
            .replace_all(text, |caps: &Captures| {
                let call = self
                    .template
                    .replace("{agent}", &normalize_name(&caps[2]))
                    .replace("{task}", &collapse_whitespace(&caps[3]));
                format!("{}{}", &caps[1], call)
            })
            .into_owned()
    }
}

/// Whole-word substitution of the source tool's special primitives
#[derive(Debug, Clone)]
pub struct ToolNames {
    ask_question: &'static str,
    todo_write: &'static str,
    todo_read: &'static str,
}

impl ToolNames {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            ask_question: vocabulary.ask_question,
            todo_write: vocabulary.todo_write,
            todo_read: vocabulary.todo_read,
        }
    }
}

impl RewriteRule for ToolNames {
    fn name(&self) -> &'static str {
        "tool-names"
    }

    fn apply(&self, text: &str) -> String {
        // NoExpand: replacements may contain `$`
        let text = ASK_QUESTION_REGEX.replace_all(text, regex::NoExpand(self.ask_question));
        let text = TODO_WRITE_REGEX.replace_all(&text, regex::NoExpand(self.todo_write));
        TODO_READ_REGEX
            .replace_all(&text, regex::NoExpand(self.todo_read))
            .into_owned()
    }
}

/// `/command`, `/namespace:command`, `/skill:name` and `/prompts:name`
#[derive(Debug, Clone)]
pub struct CommandReferences {
    reserved: HashSet<String>,
}

impl CommandReferences {
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    fn rewrite_reference(&self, name: &str) -> Option<String> {
        if self.reserved.contains(name) {
            return None;
        }
        if let Some(skill) = name.strip_prefix("skill:") {
            return Some(format!("/skill:{}", normalize_name(skill)));
        }
        let name = name.strip_prefix("prompts:").unwrap_or(name);
        Some(format!("/{}", normalize_name(name)))
    }
}

impl Default for CommandReferences {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_PATHS.iter().copied())
    }
}

fn is_reference_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | '"' | '\'' | ')' | ']' | '}' | '`')
}

impl RewriteRule for CommandReferences {
    fn name(&self) -> &'static str {
        "command-references"
    }

    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in COMMAND_REF_REGEX.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let preceded_by_word = text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':');
            // A following `/` means a real path, any other character means
            // the token is part of something larger
            let well_terminated = text[whole.end()..]
                .chars()
                .next()
                .is_none_or(is_reference_terminator);
            if preceded_by_word || !well_terminated {
                continue;
            }

            if let Some(replacement) = self.rewrite_reference(name.as_str()) {
                out.push_str(&text[last..whole.start()]);
                out.push_str(&replacement);
                last = whole.end();
            }
        }

        out.push_str(&text[last..]);
        out
    }
}

/// Appends a fixed note when the body mentions MCP
#[derive(Debug, Clone)]
pub struct CompatibilityNote {
    note: &'static str,
}

impl CompatibilityNote {
    pub fn new(note: &'static str) -> Self {
        Self { note }
    }
}

impl RewriteRule for CompatibilityNote {
    fn name(&self) -> &'static str {
        "compatibility-note"
    }

    fn apply(&self, text: &str) -> String {
        if !MCP_REGEX.is_match(text) {
            return text.to_string();
        }
        format!("{}\n\n{}", text.trim_end(), self.note)
    }
}

/// Ordered rule chain for one target vocabulary
#[derive(Debug)]
pub struct Rewriter {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl Rewriter {
    /// The standard four-rule chain
    pub fn new<I, S>(vocabulary: &Vocabulary, reserved_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rules(vec![
            Box::new(AgentInvocation::new(vocabulary.subagent_template)),
            Box::new(ToolNames::new(vocabulary)),
            Box::new(CommandReferences::new(reserved_paths)),
            Box::new(CompatibilityNote::new(vocabulary.mcp_note)),
        ])
    }

    pub fn from_rules(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn rewrite(&self, body: &str) -> String {
        self.rules
            .iter()
            .fold(body.to_string(), |text, rule| rule.apply(&text))
    }
}
