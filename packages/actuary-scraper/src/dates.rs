//! Relative posting dates ("3 days ago", "1 week") resolved against a fixed day.

use std::sync::LazyLock;

use chrono::{NaiveDate, TimeDelta};
use regex::Regex;

/// "3 days", "30+ days", "1 week", "2 months"
static COUNTED_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\+?\s*(day|week|month)s?\b").unwrap());

/// A unit without a count ("day ago", "a week ago", "last month") means one.
static BARE_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(day|week|month)s?\b").unwrap());

/// Resolve a listing's relative date text against `today`.
///
/// Unrecognized text (including an empty string) resolves to `today`, as
/// does a count too large to subtract from it.
pub fn parse_relative_date(text: &str, today: NaiveDate) -> NaiveDate {
    let text = text.trim().to_lowercase();
    if text.is_empty() || text.contains("today") {
        return today;
    }
    if text.contains("yesterday") {
        return days_before(today, 1);
    }

    if let Some(caps) = COUNTED_UNIT.captures(&text) {
        // Digits that overflow i64 are not a date we can place
        let Ok(count) = caps[1].parse::<i64>() else {
            return today;
        };
        return unit_days(&caps[2], count)
            .map(|days| days_before(today, days))
            .unwrap_or(today);
    }

    match BARE_UNIT.captures(&text) {
        Some(caps) => unit_days(&caps[1], 1)
            .map(|days| days_before(today, days))
            .unwrap_or(today),
        None => today,
    }
}

/// Days in `count` of `unit`; months count as 30 days.
fn unit_days(unit: &str, count: i64) -> Option<i64> {
    match unit {
        "day" => Some(count),
        "week" => count.checked_mul(7),
        "month" => count.checked_mul(30),
        _ => None,
    }
}

fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_sub_signed(delta))
        .unwrap_or(today)
}
