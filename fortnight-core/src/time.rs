//! Time utilities: deadline text and friendly countdowns.
//!
//! All timestamps are naive local times; there is no timezone handling.

use chrono::{NaiveDate, NaiveDateTime};

use crate::task::ValidationError;

/// Record/display format for deadlines, e.g. "2026-02-20 23:59".
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a deadline like "2026-02-20 23:59".
pub fn parse_deadline(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, DEADLINE_FORMAT).map_err(|_| {
        ValidationError::InvalidDeadline {
            value: text.to_string(),
        }
    })
}

pub fn format_deadline(dt: NaiveDateTime) -> String {
    dt.format(DEADLINE_FORMAT).to_string()
}

/// Calendar date of a timestamp ("today" when given now).
pub fn day_of(dt: NaiveDateTime) -> NaiveDate {
    dt.date()
}

/// "1 day, 2 hours, 5 minutes left", "Overdue", or "Less than a minute left".
pub fn human_time_left(deadline: NaiveDateTime, now: NaiveDateTime) -> String {
    if deadline <= now {
        return "Overdue".to_string();
    }

    let secs = (deadline - now).num_seconds();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| plural(n, unit))
        .collect();

    if parts.is_empty() {
        return "Less than a minute left".to_string();
    }
    format!("{} left", parts.join(", "))
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
