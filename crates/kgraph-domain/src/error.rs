//! Domain error types.

use thiserror::Error;

use kgraph_session::{GraphError, ValidationError};

/// Domain-level errors.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller supplied invalid input; nothing was changed.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Session not found.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Export format name not recognized.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Tagger or lexicon setup failed.
    #[error("Extraction error: {0}")]
    Extraction(#[from] kgraph_extract::ExtractError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GraphError> for DomainError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidInput(e) => Self::InvalidInput(e),
            GraphError::SessionNotFound(id) => Self::SessionNotFound(id),
            GraphError::UnsupportedFormat(name) => Self::UnsupportedFormat(name),
            GraphError::Serialization(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
