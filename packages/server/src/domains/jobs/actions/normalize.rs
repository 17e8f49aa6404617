//! Field normalization applied before a job reaches the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::domains::jobs::data::TagsInput;

/// Job type stored when the caller does not supply one
pub const DEFAULT_JOB_TYPE: &str = "Full-Time";

/// Naive date-time layouts accepted for `posting_date` (interpreted as UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Trimmed value, or None when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an ISO-8601 posting date. Absent or unparseable input yields `now`.
pub fn parse_posting_date(value: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return now;
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.and_utc();
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return midnight.and_utc();
    }

    debug!(posting_date = %raw, "Unparseable posting date, using current time");
    now
}

/// Resolve either tag form into the stored list.
pub fn normalize_tags(input: TagsInput) -> Vec<String> {
    match input {
        TagsInput::List(tags) => clean_tags(tags),
        TagsInput::Text(text) => clean_tags(text.split(',').map(str::to_string)),
    }
}

/// Trim, drop empties and duplicates. First occurrence wins so order is kept.
pub fn clean_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || cleaned.iter().any(|existing| existing == tag) {
            continue;
        }
        cleaned.push(tag.to_string());
    }
    cleaned
}
