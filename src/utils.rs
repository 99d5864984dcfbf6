//! Utility functions for timestamp formatting and log-friendly string handling.
//!
//! This module provides helper functions used throughout the application:
//! - ISO-8601 timestamps for the page footer and the result record
//! - Key-safe timestamps for remote object names
//! - Human-readable local timestamps for notification messages
//! - String truncation for logging subprocess diagnostics

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Render an instant as ISO-8601 UTC with millisecond precision.
///
/// The output always uses the `Z` suffix, e.g. `2026-10-18T09:51:00.123Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render an instant as an ISO-8601 string that is safe to use in a file name
/// or URL path segment.
///
/// Every `:` and `.` in [`iso_timestamp`] is replaced with `-`.
///
/// # Examples
///
/// ```ignore
/// // 2026-10-18T09:51:00.123Z -> 2026-10-18T09-51-00-123Z
/// let key = key_safe_timestamp(at);
/// ```
pub fn key_safe_timestamp(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace([':', '.'], "-")
}

/// Render an instant in the local timezone for humans, e.g. `10/18/2026, 9:51:00 AM`.
pub fn human_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// character boundary) with an ellipsis and byte count indicator appended.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if not longer than `max`, otherwise a truncated version
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
