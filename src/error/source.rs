//! Source tree errors

use super::AgentportError;

/// Creates a source not found error
pub fn not_found(path: impl Into<String>) -> AgentportError {
    AgentportError::SourceNotFound { path: path.into() }
}

/// Creates a source parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AgentportError {
    AgentportError::SourceParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
