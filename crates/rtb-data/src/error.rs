//! Error types for record helpers

/// Errors from record search and indexing
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A record lacks the key being indexed on
    #[error("record {index} has no key '{key}'")]
    MissingKey { key: String, index: usize },

    /// Search pattern is not a valid regular expression
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
