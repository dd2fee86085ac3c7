//! Error types for reprolint
//!
//! Scoring itself never fails; these errors cover the boundaries: building the
//! requirements registry, reading procedure documents, and loading configuration.

use thiserror::Error;

/// Result type alias using ReprolintError
pub type Result<T> = std::result::Result<T, ReprolintError>;

/// Unified error type for reprolint operations
#[derive(Debug, Error)]
pub enum ReprolintError {
    // Registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // Document errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // File errors
    #[error("I/O error: {0}")]
    Io(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while building the requirements registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Action name must not be empty")]
    EmptyActionName,

    #[error("Duplicate action definition: {action}")]
    DuplicateAction { action: String },

    #[error("Parameter '{param}' is both required and optional for action '{action}'")]
    ConflictingParameter { action: String, param: String },

    #[error("Malformed requirements document: {0}")]
    Malformed(String),
}

/// Errors raised while reading a procedure document
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document root must be a JSON object")]
    NotAnObject,

    #[error("Error at {path}: {message}")]
    InvalidField { path: String, message: String },
}

impl DocumentError {
    /// Build an error for a field path such as `steps -> 3 -> parameters`
    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::InvalidField {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for ReprolintError {
    fn from(err: serde_json::Error) -> Self {
        ReprolintError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ReprolintError {
    fn from(err: std::io::Error) -> Self {
        ReprolintError::Io(err.to_string())
    }
}
