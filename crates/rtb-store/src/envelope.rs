//! Envelope model
//!
//! The persisted record: normalized filename, comment, save timestamp and
//! a list-or-mapping payload. Both backends share the `serde_json::Value`
//! data model for payload contents.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// On-disk timestamp layout: `YYYY-MM-DD HH:MM:SS.ffffff`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Kind of a decoded value, used in shape diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Ordered list of values
    Sequence,
    /// String-keyed mapping
    Mapping,
    /// Null / absent
    Null,
    /// Boolean scalar
    Bool,
    /// Numeric scalar
    Number,
    /// String scalar
    String,
}

impl Shape {
    /// Classify a value
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
        }
    }

    /// Whether a payload may have this shape
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Sequence | Self::Mapping)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// Envelope payload: a sequence or a string-keyed mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Ordered sequence of values
    Sequence(Vec<Value>),
    /// Mapping of unique string keys to values
    Mapping(Map<String, Value>),
}

impl Payload {
    /// Empty sequence payload
    #[inline]
    #[must_use]
    pub fn empty_sequence() -> Self {
        Self::Sequence(Vec::new())
    }

    /// Empty mapping payload
    #[inline]
    #[must_use]
    pub fn empty_mapping() -> Self {
        Self::Mapping(Map::new())
    }

    /// Shape of this payload
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
        }
    }

    /// Number of top-level entries
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Mapping(map) => map.len(),
        }
    }

    /// True if there are no top-level entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequence contents, if this is a sequence
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Mapping(_) => None,
        }
    }

    /// Mapping contents, if this is a mapping
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Sequence(_) => None,
        }
    }

    /// Convert into a plain value
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Sequence(items) => Value::Array(items),
            Self::Mapping(map) => Value::Object(map),
        }
    }
}

impl From<Vec<Value>> for Payload {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Mapping(map)
    }
}

impl TryFrom<Value> for Payload {
    type Error = Shape;

    /// Fails with the offending shape when `value` is a scalar or null
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(Self::Sequence(items)),
            Value::Object(map) => Ok(Self::Mapping(map)),
            other => Err(Shape::of(&other)),
        }
    }
}

/// The metadata-wrapped record persisted to a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Normalized, suffix-qualified filename
    #[serde(rename = "fname")]
    pub filename: String,
    /// Free-text annotation, empty when absent
    #[serde(default, deserialize_with = "nullable_string")]
    pub comment: String,
    /// Moment of saving, microsecond precision
    #[serde(rename = "date", with = "timestamp")]
    pub saved_at: NaiveDateTime,
    /// Stored data
    #[serde(rename = "data")]
    pub payload: Payload,
}

impl Envelope {
    /// Build an envelope
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        comment: impl Into<String>,
        saved_at: NaiveDateTime,
        payload: Payload,
    ) -> Self {
        Self {
            filename: filename.into(),
            comment: comment.into(),
            saved_at,
            payload,
        }
    }

    /// Render the envelope as a mapping with the on-disk keys
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("fname".to_string(), Value::String(self.filename.clone()));
        map.insert("comment".to_string(), Value::String(self.comment.clone()));
        map.insert(
            "date".to_string(),
            Value::String(timestamp::format(&self.saved_at)),
        );
        map.insert("data".to_string(), self.payload.clone().into_value());
        map
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamp text conversions in [`TIMESTAMP_FORMAT`]
pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Render a timestamp
    #[must_use]
    pub fn format(ts: &NaiveDateTime) -> String {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a timestamp rendered by [`format`]
    ///
    /// # Errors
    /// Returns the chrono parse error when `text` does not match the layout
    pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
    }

    /// Serde serializer
    ///
    /// # Errors
    /// Propagates serializer errors
    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    /// Serde deserializer
    ///
    /// # Errors
    /// Fails when the string does not match [`TIMESTAMP_FORMAT`]
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_micro_opt(9, 5, 1, 42)
            .unwrap()
    }

    #[test]
    fn timestamp_always_has_six_fraction_digits() {
        assert_eq!(timestamp::format(&sample_time()), "2024-03-07 09:05:01.000042");

        let whole = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(timestamp::format(&whole), "2024-01-01 00:00:00.000000");
    }

    #[test]
    fn timestamp_parse_matches_format() {
        let parsed = timestamp::parse("2024-03-07 09:05:01.000042").unwrap();
        assert_eq!(parsed, sample_time());
        assert!(timestamp::parse("07/03/2024").is_err());
    }

    #[test]
    fn envelope_uses_on_disk_keys() {
        let env = Envelope::new("a.json", "note", sample_time(), json!(["x"]).try_into().unwrap());
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "fname": "a.json",
                "comment": "note",
                "date": "2024-03-07 09:05:01.000042",
                "data": ["x"],
            })
        );
        assert_eq!(Value::Object(env.to_mapping()), value);
    }

    #[test]
    fn null_comment_reads_as_empty() {
        let env: Envelope = serde_json::from_value(json!({
            "fname": "a.json",
            "comment": null,
            "date": "2024-03-07 09:05:01.000042",
            "data": {},
        }))
        .unwrap();
        assert_eq!(env.comment, "");
        assert_eq!(env.payload, Payload::empty_mapping());
    }

    #[test]
    fn scalar_payload_is_rejected() {
        assert_eq!(Payload::try_from(json!("text")), Err(Shape::String));
        assert_eq!(Payload::try_from(Value::Null), Err(Shape::Null));
        assert_eq!(
            Payload::try_from(json!({"k": 1})).map(|p| p.shape()),
            Ok(Shape::Mapping)
        );
    }
}
