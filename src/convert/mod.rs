//! Source-to-target conversion
//!
//! - [`names`]: slug normalization and per-bundle collision resolution
//! - [`rewrite`]: the ordered rule chain applied to instruction bodies
//! - [`mcp`]: MCP server spec translation
//! - [`assemble`]: builds a target [`Bundle`](crate::domain::Bundle)

pub mod assemble;
pub mod mcp;
pub mod names;
pub mod rewrite;

pub use assemble::{Assembler, MAX_DESCRIPTION_LEN, clamp_description};
pub use mcp::translate_servers;
pub use names::{FALLBACK_NAME, NameRegistry, is_valid_skill_name, normalize_name};
pub use rewrite::{DEFAULT_RESERVED_PATHS, RewriteRule, Rewriter};
