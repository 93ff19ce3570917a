//! File system errors

use std::path::Path;

use super::AgentportError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> AgentportError {
    AgentportError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> AgentportError {
    AgentportError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> AgentportError {
    AgentportError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> AgentportError {
    AgentportError::IoError {
        message: message.into(),
    }
}

/// Read failure for `path` caused by `err`
pub fn read_error(path: &Path, err: &std::io::Error) -> AgentportError {
    read_failed(path.display().to_string(), err.to_string())
}

/// Write failure for `path` caused by `err`
pub fn write_error(path: &Path, err: &std::io::Error) -> AgentportError {
    write_failed(path.display().to_string(), err.to_string())
}
