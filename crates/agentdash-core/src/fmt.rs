//! Shared formatting helpers for table cells and detail popups.
//!
//! Pure string functions only; no ratatui styles live here.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Truncate to `max_chars` characters, appending `...` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Collapses all whitespace (newlines, tabs, runs of spaces) into single
/// spaces and trims the ends.
pub fn normalize_for_display(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses the timestamp shapes backends commonly emit: RFC 3339, naive ISO
/// 8601 (taken as UTC), or unix seconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Formats a timestamp in local time (`%Y-%m-%d %H:%M:%S`). Unparseable input
/// is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Compact age relative to `now`: `"3s"`, `"5m"`, `"2h"`, `"7d"`; `"-"` for
/// unparseable or future timestamps.
pub fn format_age(raw: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return "-".to_string();
    };
    let age = (now - ts).num_seconds();
    if age < 0 {
        "-".to_string()
    } else if age < 60 {
        format!("{}s", age)
    } else if age < 3600 {
        format!("{}m", age / 60)
    } else if age < 86400 {
        format!("{}h", age / 3600)
    } else {
        format!("{}d", age / 86400)
    }
}

/// Returns `value` unless it is blank, otherwise `fallback`.
pub fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
