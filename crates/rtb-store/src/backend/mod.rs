//! Serialization backends
//!
//! Each backend binds a structured-text codec to a file suffix:
//! - JSON (`.json`) via serde_json, pretty printed
//! - YAML (`.yml`) via serde_yaml, block style

use crate::config::StoreConfig;
use crate::envelope::Envelope;
use crate::error::{DecodeError, EncodeError};
use serde_json::Value;
use std::fmt;
use std::path::Path;

mod json;
mod yaml;

pub use json::JsonBackend;
pub use yaml::YamlBackend;

/// Codec seam between the store and a text format
///
/// Implement this trait to add support for new file formats.
pub trait Backend: Send + Sync + 'static {
    /// Format handled by this backend
    fn format(&self) -> Format;

    /// Required filename suffix, including the dot
    fn suffix(&self) -> &'static str {
        self.format().suffix()
    }

    /// Encode a full envelope to text
    ///
    /// # Errors
    /// Returns [`EncodeError`] if the codec rejects the value
    fn encode(&self, envelope: &Envelope) -> Result<String, EncodeError>;

    /// Decode file text into a generic value
    ///
    /// # Errors
    /// Returns [`DecodeError`] on syntax errors
    fn decode(&self, text: &str) -> Result<Value, DecodeError>;

    /// Check if this backend owns the given path
    fn can_handle(&self, path: &Path) -> bool {
        path.to_str().is_some_and(|p| p.ends_with(self.suffix()))
    }
}

/// Available serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON-style encoding, `.json`
    Json,
    /// YAML-style encoding, `.yml`
    Yaml,
}

impl Format {
    /// All supported formats
    pub const ALL: [Format; 2] = [Format::Json, Format::Yaml];

    /// Required filename suffix
    #[inline]
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Yaml => ".yml",
        }
    }

    /// Pick the format whose suffix the path carries
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref().to_str()?;
        Self::ALL.into_iter().find(|f| path.ends_with(f.suffix()))
    }

    /// Instantiate the backend for this format
    #[must_use]
    pub fn backend(self, config: &StoreConfig) -> Box<dyn Backend> {
        match self {
            Self::Json => Box::new(JsonBackend::with_indent(config.json_indent)),
            Self::Yaml => Box::new(YamlBackend::new()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path() {
        assert_eq!(Format::from_path("x.json"), Some(Format::Json));
        assert_eq!(Format::from_path("dir/y.yml"), Some(Format::Yaml));
        assert_eq!(Format::from_path("z.yaml"), None);
        assert_eq!(Format::from_path("notes.txt"), None);
        assert_eq!(Format::from_path("json"), None);
    }

    #[test]
    fn backend_matches_format() {
        let config = StoreConfig::default();
        for format in Format::ALL {
            let backend = format.backend(&config);
            assert_eq!(backend.format(), format);
            assert_eq!(backend.suffix(), format.suffix());
        }
    }

    #[test]
    fn can_handle_by_suffix() {
        let backend = JsonBackend::new();
        assert!(backend.can_handle(Path::new("a/b.json")));
        assert!(!backend.can_handle(Path::new("a/b.yml")));
        assert!(!backend.can_handle(Path::new("b")));
    }
}
