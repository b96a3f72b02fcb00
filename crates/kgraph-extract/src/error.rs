//! Error types for the extraction crate.

/// Errors raised while building taggers. Extraction itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Failed to read a lexicon file.
    #[error("failed to read lexicon '{path}': {source}")]
    ReadLexicon {
        path: String,
        source: std::io::Error,
    },

    /// A lexicon line could not be parsed.
    #[error("invalid lexicon entry on line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },

    /// The segmentation backend rejected a dictionary.
    #[error("tagger backend error: {0}")]
    Backend(String),
}

/// Result type alias for extraction setup.
pub type Result<T> = std::result::Result<T, ExtractError>;
