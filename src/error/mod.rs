//! Error types and handling for agentport
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`fs`]: File system errors
//! - [`config`]: Configuration errors
//! - [`source`]: Source tree errors
//! - [`target`]: Target and sync errors

pub mod config;
pub mod fs;
pub mod source;
pub mod target;

pub use config::{invalid as config_invalid, parse_failed as config_parse_failed};
pub use fs::{io_error, not_found as file_not_found};
pub use source::{not_found as source_not_found, parse_failed as source_parse_failed};
pub use target::{
    invalid_server_map, not_supported as target_not_supported, targets_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for agentport operations
#[derive(Error, Diagnostic, Debug)]
pub enum AgentportError {
    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(agentport::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(agentport::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(agentport::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(agentport::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(agentport::config::parse_failed),
        help("Check the YAML syntax of the configuration file")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(agentport::config::invalid))]
    ConfigInvalid { message: String },

    // Source errors
    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(agentport::source::not_found),
        help("Pass --source <dir> or set AGENTPORT_SOURCE to your Claude home or plugin directory")
    )]
    SourceNotFound { path: String },

    #[error("Failed to parse source file: {path}: {reason}")]
    #[diagnostic(code(agentport::source::parse_failed))]
    SourceParseFailed { path: String, reason: String },

    // Target errors
    #[error("Target not supported: {target}")]
    #[diagnostic(
        code(agentport::target::not_supported),
        help("Supported targets: pi, cursor, droid (run 'agentport targets' for details)")
    )]
    TargetNotSupported { target: String },

    #[error("Invalid server map in {path}: {reason}")]
    #[diagnostic(
        code(agentport::target::invalid_server_map),
        help("Fix or remove the file; agentport only merges into a JSON object with an 'mcpServers' object")
    )]
    InvalidServerMap { path: String, reason: String },

    #[error("Sync failed for {count} target(s): {targets}")]
    #[diagnostic(code(agentport::target::sync_failed))]
    TargetsFailed { count: usize, targets: String },
}

impl From<std::io::Error> for AgentportError {
    fn from(err: std::io::Error) -> Self {
        AgentportError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AgentportError {
    fn from(err: serde_yaml::Error) -> Self {
        AgentportError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AgentportError {
    fn from(err: serde_json::Error) -> Self {
        AgentportError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AgentportError>;
