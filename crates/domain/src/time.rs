//! Timestamps for `created_at` / `updated_at` and their text form.
//!
//! Timestamps are written as RFC 3339 in UTC. Reading also accepts naive
//! ISO 8601 text without an offset (`2017-09-28T21:05:54.119427`), which is
//! taken to be UTC.

use chrono::{DateTime, NaiveDateTime, ParseError, SecondsFormat, Utc};

/// UTC instant of `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp the way it is stored and served.
#[must_use]
pub fn format(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse RFC 3339 text, falling back to a naive UTC timestamp.
///
/// # Errors
///
/// Returns the naive parse error when neither form matches.
pub fn parse(raw: &str) -> Result<Timestamp, ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(value) => Ok(value.to_utc()),
        Err(_) => NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT).map(|naive| naive.and_utc()),
    }
}

/// `#[serde(with = "crate::time::iso")]` codec built on [`format`] and [`parse`].
pub mod iso {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(value))
    }

    /// # Errors
    ///
    /// Fails when the value is not a string or not a timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}
