//! Domain models for agentport
//!
//! Pure value types: the source model read from a Claude configuration tree
//! and the target-specific bundle assembled from it.

pub mod bundle;
pub mod source;

pub use bundle::{Bundle, ExtensionFile, GeneratedArtifact, PassthroughDir, ServerEntry, ServerMap};
pub use source::{McpServerSpec, SourceAgent, SourceCommand, SourceConfig, SourceSkill, Transport};
