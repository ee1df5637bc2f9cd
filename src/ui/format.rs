use chrono::{DateTime, Duration, Utc};

use crate::config::TIMESTAMP_FORMAT;

/// Render a duration as its largest whole unit: `45s`, `12m`, `3h`, `2d`.
pub(super) fn format_duration_compact(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();
    let abs_seconds = total_seconds.abs();

    let (value, unit) = if abs_seconds < 60 {
        (abs_seconds, "s")
    } else if abs_seconds < 3600 {
        (abs_seconds / 60, "m")
    } else if abs_seconds < 86400 {
        (abs_seconds / 3600, "h")
    } else {
        (abs_seconds / 86400, "d")
    };

    if total_seconds < 0 {
        format!("-{value}{unit}")
    } else {
        format!("{value}{unit}")
    }
}

/// `2025-01-01 09:30 (3h ago)`
pub(super) fn timestamp_with_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = format_duration_compact(now.signed_duration_since(at));
    format!("{} ({age} ago)", at.format(TIMESTAMP_FORMAT))
}
