use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "10s", "500ms", "2m". A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Invalid duration: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Parse a watch-mode refresh interval; like [`parse_duration`] but zero is
/// rejected.
pub fn parse_interval(s: &str) -> Result<Duration> {
    let interval = parse_duration(s)?;
    if interval.is_zero() {
        bail!("Interval must be greater than zero: {}", s.trim());
    }
    Ok(interval)
}

/// Relative-time units, largest first.
const RELATIVE_UNITS: &[(&str, i64)] = &[
    ("year", 365 * 24 * 60 * 60),
    ("month", 30 * 24 * 60 * 60),
    ("week", 7 * 24 * 60 * 60),
    ("day", 24 * 60 * 60),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

/// Describe `then` relative to `now` (both epoch seconds): "3 hours ago",
/// "1 day from now".
///
/// Returns `"unknown"` when `then` is missing or not a finite number.
pub fn format_relative(then: Option<f64>, now: i64) -> String {
    let Some(then) = then.filter(|t| t.is_finite()) else {
        return "unknown".to_string();
    };

    let delta = now as f64 - then;
    let suffix = if delta < 0.0 { "from now" } else { "ago" };
    let secs = delta.abs().round() as i64;

    for (name, size) in RELATIVE_UNITS {
        let count = secs / size;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{} {}{} {}", count, name, plural, suffix);
        }
    }

    format!("0 seconds {}", suffix)
}
