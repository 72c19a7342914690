//! YAML backend
//!
//! Uses serde_yaml, which emits block-style documents.

use crate::backend::{Backend, Format};
use crate::envelope::Envelope;
use crate::error::{DecodeError, EncodeError};
use serde_json::Value;

/// YAML backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlBackend;

impl YamlBackend {
    /// Create new YAML backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Backend for YamlBackend {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, envelope: &Envelope) -> Result<String, EncodeError> {
        Ok(serde_yaml::to_string(envelope)?)
    }

    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
