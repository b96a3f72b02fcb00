//! Error types for session graph operations.

use crate::validation::ValidationError;

/// Error type for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Caller supplied invalid input; nothing was changed.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No live session with this ID.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Export format name not recognized.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Rendering an export failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, GraphError>;
