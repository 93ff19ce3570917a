//! Command implementations for agentport CLI
//!
//! This module contains the implementation of each CLI command.

pub mod completions;
pub mod sync;
pub mod targets;
pub mod version;
