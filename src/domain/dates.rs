use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::RecordError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a service timestamp into a comparable UTC time point.
///
/// Naive timestamps (no offset) are taken as UTC, and a bare date means
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(RecordError::InvalidTimestamp(raw.to_string()))
}

pub fn parse_optional_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, RecordError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(Some(parse_timestamp(s)?)),
        None => Ok(None),
    }
}
