//! Human-readable rendering of byte counts, rates and durations.

use std::time::Duration;

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with binary (1024) scaling.
///
/// Whole bytes have no decimals, scaled units one. Negative input reads as 0.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes.max(0.0);
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{value:.0} {}", BYTE_UNITS[unit])
    } else {
        format!("{value:.1} {}", BYTE_UNITS[unit])
    }
}

pub fn format_bytes_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// Format a server uptime given in seconds, e.g. `1d 01h 01m 01s`.
pub fn format_uptime(seconds: f64) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "0s".to_string();
    }
    let total = seconds.round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;
    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m {secs:02}s")
    } else {
        format!("{hours:02}h {minutes:02}m {secs:02}s")
    }
}

/// Compact duration for the title bar: `500ms`, `2s`, `1.5s`, `1m30s`.
pub fn format_interval(interval: Duration) -> String {
    if interval.is_zero() {
        return "0s".to_string();
    }
    if interval < Duration::from_millis(1) {
        return format!("{}µs", interval.as_micros());
    }
    if interval < Duration::from_secs(1) {
        return format!("{}ms", trim_fraction(interval.as_secs_f64() * 1_000.0));
    }
    let whole = interval.as_secs();
    let hours = whole / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = trim_fraction((whole % 60) as f64 + f64::from(interval.subsec_nanos()) / 1e9);
    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn trim_fraction(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
