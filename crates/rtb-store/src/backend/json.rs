//! JSON backend
//!
//! Uses serde_json with a pretty formatter (2-space indent unless configured).

use crate::backend::{Backend, Format};
use crate::envelope::Envelope;
use crate::error::{DecodeError, EncodeError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// JSON backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBackend {
    indent: Vec<u8>,
}

impl JsonBackend {
    /// Create new JSON backend with the default 2-space indent
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent(2)
    }

    /// Create JSON backend indenting by `width` spaces
    #[must_use]
    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: vec![b' '; width],
        }
    }
}

impl Default for JsonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for JsonBackend {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, envelope: &Envelope) -> Result<String, EncodeError> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        envelope.serialize(&mut ser)?;
        Ok(String::from_utf8(out)?)
    }

    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}
