use std::fmt::Write;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};

/// Human readable byte count using decimal units, like Finder shows them.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes < 1000 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if value >= 100.0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Positional `H:MM:SS`, zero padded, with tenths when the duration has a
/// fractional part.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    let base = format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60);
    if tenths > 0 {
        format!("{base}.{tenths}")
    } else {
        base
    }
}

/// Local time rendered with a `chrono` format string. An invalid format
/// falls back to RFC 3339 rather than panicking.
pub fn format_date(t: SystemTime, fmt: &str) -> String {
    let local: DateTime<Local> = t.into();
    let mut out = String::new();
    if write!(out, "{}", local.format(fmt)).is_err() {
        return local.to_rfc3339();
    }
    out
}
