//! Lenient record dates.
//!
//! Dates arrive from the data source as free-form strings. Some are ISO
//! dates, some are full RFC 3339 timestamps, and some are empty or garbage.
//! `RecordDate` keeps the raw string for display and the parsed timestamp
//! when one could be recovered, so callers never have to fail on bad input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const SECONDS_PER_DAY: i64 = 86_400;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A date as supplied by the data source.
///
/// Equality and ordering both use `(sort_key, raw)`: dates order
/// chronologically, invalid ones first, and same-instant dates by raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct RecordDate {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl RecordDate {
    /// Parse a raw date string. Never fails; unparseable input keeps only the raw text.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_timestamp(raw.trim());
        Self { raw, parsed }
    }

    /// A date with no value at all.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            raw: timestamp.format("%Y-%m-%d").to_string(),
            parsed: Some(timestamp),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }

    /// Milliseconds since the epoch, or `i64::MIN` for dates that did not parse.
    ///
    /// The sentinel orders every invalid date before all valid ones.
    pub fn sort_key(&self) -> i64 {
        self.parsed
            .map(|ts| ts.timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    /// Whole days elapsed from this date to `now`, floored.
    ///
    /// Returns `None` when the date did not parse. Dates in the future give
    /// negative values.
    pub fn days_since(&self, now: DateTime<Utc>) -> Option<i64> {
        self.parsed
            .map(|ts| (now - ts).num_seconds().div_euclid(SECONDS_PER_DAY))
    }

    /// Short display form ("Oct 5"), falling back to the raw string.
    pub fn display(&self) -> String {
        match self.parsed {
            Some(ts) => ts.format("%b %-d").to_string(),
            None => self.raw.clone(),
        }
    }
}

impl PartialEq for RecordDate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RecordDate {}

impl PartialOrd for RecordDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl From<Option<String>> for RecordDate {
    fn from(value: Option<String>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }
}

impl From<RecordDate> for String {
    fn from(value: RecordDate) -> Self {
        value.raw
    }
}

impl From<&str> for RecordDate {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> DateTime<Utc> {
        RecordDate::parse(date).timestamp().unwrap()
    }

    #[test]
    fn parses_plain_iso_dates() {
        let date = RecordDate::parse("2025-10-05");
        assert!(date.is_valid());
        assert_eq!(date.raw(), "2025-10-05");
        assert_eq!(date.display(), "Oct 5");
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let date = RecordDate::parse("2025-10-05T08:30:00+08:00");
        assert_eq!(date.timestamp(), Some(at("2025-10-05T00:30:00Z")));
    }

    #[test]
    fn unparseable_dates_keep_raw_text() {
        let date = RecordDate::parse("next week");
        assert!(!date.is_valid());
        assert_eq!(date.raw(), "next week");
        assert_eq!(date.display(), "next week");
        assert_eq!(date.sort_key(), i64::MIN);
    }

    #[test]
    fn invalid_dates_order_before_valid_ones() {
        let invalid = RecordDate::parse("??");
        let old = RecordDate::parse("1970-01-01");
        assert!(invalid < old);
    }

    #[test]
    fn ordering_agrees_with_equality() {
        let a = RecordDate::parse("next week");
        let b = RecordDate::parse("TBD");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.sort_key(), b.sort_key());

        let same = RecordDate::parse("next week");
        assert_eq!(a, same);
        assert_eq!(a.cmp(&same), Ordering::Equal);
    }

    #[test]
    fn days_since_floors_partial_days() {
        let date = RecordDate::parse("2025-10-01");
        let now = at("2025-10-31T23:59:00Z");
        assert_eq!(date.days_since(now), Some(30));
    }

    #[test]
    fn days_since_future_date_is_negative() {
        let date = RecordDate::parse("2025-10-02T12:00:00Z");
        let now = at("2025-10-01");
        assert_eq!(date.days_since(now), Some(-2));
    }

    #[test]
    fn deserializes_null_as_missing() {
        let date: RecordDate = serde_json::from_str("null").unwrap();
        assert_eq!(date, RecordDate::missing());
    }

    #[test]
    fn serializes_raw_string() {
        let date = RecordDate::parse("garbage");
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"garbage\"");
    }
}
