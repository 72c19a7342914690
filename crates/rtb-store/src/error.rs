//! Error types for the envelope store
//!
//! Provides error handling for:
//! - Load operations (file → envelope)
//! - Save operations (envelope → file)
//! - Backend codec failures

use crate::envelope::Shape;
use std::path::PathBuf;

/// Errors raised by a backend while decoding file text
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// JSON syntax error
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised by a backend while encoding an envelope
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// JSON serialization failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed
    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Encoded bytes were not valid UTF-8
    #[error("encoded output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors during envelope loading
///
/// Every variant is recoverable: the lenient loaders on
/// [`EnvelopeStore`](crate::EnvelopeStore) log it and return an empty
/// container of the requested shape.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Requested file is absent
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// IO error other than absence while reading
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content parsed but is not a well-formed envelope
    #[error("malformed envelope in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Payload is not the container kind the caller asked for
    #[error("wrong payload shape in {path}: expected {expected}, got {actual}")]
    WrongShape {
        path: PathBuf,
        expected: Shape,
        actual: Shape,
    },
}

impl LoadError {
    /// Create IO error for path, mapping absence to [`LoadError::NotFound`]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Create malformed-envelope error for path
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the lenient loaders degrade this error to an empty container
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Path of the file the error refers to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Malformed { path, .. }
            | Self::WrongShape { path, .. } => path,
        }
    }
}

/// Errors during envelope saving
///
/// These are write failures and are never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// IO error during file write or removal
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend could not encode the envelope
    #[error("encoding failed for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    /// Value handed to the store is neither a sequence nor a mapping
    #[error("unsupported payload: expected sequence or mapping, got {0}")]
    UnsupportedPayload(Shape),
}

impl SaveError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("save error: {0}")]
    Save(#[from] SaveError),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn not_found_is_mapped_from_io() {
        let err = LoadError::io_error("a.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "file not found: a.json");
    }

    #[test]
    fn other_io_errors_stay_io() {
        let err = LoadError::io_error(
            "a.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn wrong_shape_display() {
        let err = LoadError::WrongShape {
            path: "f.yml".into(),
            expected: Shape::Sequence,
            actual: Shape::Mapping,
        };
        assert_eq!(
            err.to_string(),
            "wrong payload shape in f.yml: expected sequence, got mapping"
        );
    }

    #[test]
    fn error_conversions() {
        let save = SaveError::UnsupportedPayload(Shape::String);
        let store: StoreError = save.into();
        assert!(matches!(store, StoreError::Save(_)));

        let load = LoadError::malformed("x.json", "missing `data` key");
        assert_eq!(load.path(), std::path::Path::new("x.json"));
        let store: StoreError = load.into();
        assert!(matches!(store, StoreError::Load(_)));
    }
}
