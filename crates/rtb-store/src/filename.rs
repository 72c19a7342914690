//! Filename normalization
//!
//! Every name handed to the store is qualified with the backend suffix
//! before it touches the filesystem or the envelope.

use chrono::{Datelike, NaiveDate};

/// Append `suffix` unless `name` already ends with it
///
/// Idempotent: `normalize_filename(&normalize_filename(n, s), s) == normalize_filename(n, s)`.
#[must_use]
pub fn normalize_filename(name: &str, suffix: &str) -> String {
    if name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Build `{name}_{YY}_{MM}_{DD}{suffix}` for `date`
///
/// `YY` is the last two digits of the year; month and day are zero-padded.
#[must_use]
pub fn dated_filename(name: &str, date: NaiveDate, suffix: &str) -> String {
    let year = date.year().rem_euclid(100);
    let stem = format!("{name}_{year:02}_{:02}_{:02}", date.month(), date.day());
    normalize_filename(&stem, suffix)
}
