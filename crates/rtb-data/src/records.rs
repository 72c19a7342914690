//! Search helpers over lists of JSON-like records
//!
//! Records are `serde_json::Value`s; anything that is not an object simply
//! has no fields and never matches a key lookup.

use crate::error::DataError;
use regex::Regex;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Text form of a value: null is `""`, strings are verbatim, everything
/// else uses its JSON rendering
#[must_use]
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.as_object().and_then(|map| map.get(key))
}

fn field_text<'a>(record: &'a Value, key: &str) -> Cow<'a, str> {
    field(record, key).map_or(Cow::Borrowed(""), value_text)
}

/// Re-key a list of records by the text of `record[key]`
///
/// Later records win on duplicate keys.
///
/// # Errors
/// Returns [`DataError::MissingKey`] for the first record lacking `key`
pub fn index_by_key(records: &[Value], key: &str) -> Result<Map<String, Value>, DataError> {
    let mut out = Map::new();
    for (index, record) in records.iter().enumerate() {
        let id = field(record, key).ok_or_else(|| DataError::MissingKey {
            key: key.to_string(),
            index,
        })?;
        out.insert(value_text(id).into_owned(), record.clone());
    }
    Ok(out)
}

/// First record whose `key` text contains `needle`
#[must_use]
pub fn find_first_containing<'a>(records: &'a [Value], needle: &str, key: &str) -> Option<&'a Value> {
    records
        .iter()
        .find(|record| field(record, key).is_some_and(|v| value_text(v).contains(needle)))
}

/// Records whose `key` text matches `pattern` (case sensitive)
///
/// # Errors
/// Returns [`DataError::InvalidPattern`] if `pattern` is not a valid regex
pub fn search_regex<'a>(records: &'a [Value], pattern: &str, key: &str) -> Result<Vec<&'a Value>, DataError> {
    let re = Regex::new(pattern)?;
    Ok(records
        .iter()
        .filter(|record| re.is_match(&field_text(record, key)))
        .collect())
}

/// Records whose `key` text contains `needle`; a missing key reads as `""`
#[must_use]
pub fn search_containing<'a>(records: &'a [Value], needle: &str, key: &str) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|record| field_text(record, key).contains(needle))
        .collect()
}

/// Records whose `key` equals `value` exactly; a missing key compares as null
#[must_use]
pub fn search_equal<'a>(records: &'a [Value], value: &Value, key: &str) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|record| field(record, key).unwrap_or(&Value::Null) == value)
        .collect()
}
