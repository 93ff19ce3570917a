//! Configuration errors

use super::AgentportError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AgentportError {
    AgentportError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> AgentportError {
    AgentportError::ConfigInvalid {
        message: message.into(),
    }
}
