//! Target and sync errors

use super::AgentportError;

/// Creates a target not supported error
pub fn not_supported(target: impl Into<String>) -> AgentportError {
    AgentportError::TargetNotSupported {
        target: target.into(),
    }
}

/// Creates an invalid server map error
pub fn invalid_server_map(path: impl Into<String>, reason: impl Into<String>) -> AgentportError {
    AgentportError::InvalidServerMap {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Summarizes the targets whose sync failed
pub fn targets_failed(targets: &[String]) -> AgentportError {
    AgentportError::TargetsFailed {
        count: targets.len(),
        targets: targets.join(", "),
    }
}
