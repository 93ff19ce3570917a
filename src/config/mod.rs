//! Configuration handling for agentport
//!
//! This module contains:
//! - `config.yaml` - optional user configuration
//! - Ordered candidate resolution for config, source and MCP paths

pub mod app;
pub mod resolve;

pub use app::{AppConfig, RewriteConfig, SkillsConfig, TargetConfig};
pub use resolve::{Candidate, Resolution, absolutize, expand_home, resolve};
