//! Pi coding agent target

use super::{Layout, ManagedBlockSpec, Target, Vocabulary};

pub const COMPAT_EXTENSION_NAME: &str = "compound-engineering-compat.ts";

const COMPAT_EXTENSION_SOURCE: &str = include_str!("../../assets/pi/compound-engineering-compat.ts");

const AGENTS_BLOCK_BEGIN: &str = "<!-- BEGIN COMPOUND PI TOOL MAP -->";
const AGENTS_BLOCK_END: &str = "<!-- END COMPOUND PI TOOL MAP -->";

const AGENTS_BLOCK_BODY: &str = "## Compound Engineering (Pi compatibility)

This block is managed by agentport.

Compatibility notes:
- Claude Task(agent, args) maps to the subagent extension tool
- For parallel agent runs, batch multiple subagent calls with multi_tool_use.parallel
- AskUserQuestion maps to the ask_user_question extension tool
- MCP access uses MCPorter via mcporter_list and mcporter_call extension tools
- MCPorter config path: .pi/compound-engineering/mcporter.json (project) or ~/.pi/agent/compound-engineering/mcporter.json (global)
";

const MCP_NOTE: &str = "## Pi + MCPorter note
For MCP access in Pi, use MCPorter via the generated tools:
- `mcporter_list` to inspect available MCP tools
- `mcporter_call` to invoke a tool";

pub const VOCABULARY: Vocabulary = Vocabulary {
    subagent_template: "Run subagent with agent=\"{agent}\" and task=\"{task}\".",
    ask_question: "ask_user_question",
    todo_write: "file-based todos (todos/ + /skill:file-todos)",
    todo_read: "file-based todos (todos/ + /skill:file-todos)",
    mcp_note: MCP_NOTE,
};

pub fn target() -> Target {
    Target::new("pi", "Pi", ".pi/agent")
        .with_layout(Layout::NestUnlessRoot {
            roots: &["agent", ".pi"],
            nest: ".pi",
        })
        .with_generation(VOCABULARY)
        .with_server_map("compound-engineering/mcporter.json", "baseUrl")
        .with_managed_block(ManagedBlockSpec {
            file: "AGENTS.md",
            begin: AGENTS_BLOCK_BEGIN,
            end: AGENTS_BLOCK_END,
            body: AGENTS_BLOCK_BODY,
        })
        .with_extension(COMPAT_EXTENSION_NAME, COMPAT_EXTENSION_SOURCE)
}
