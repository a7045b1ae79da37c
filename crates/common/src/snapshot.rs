use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Local};

/// One reading of the server's `stats` output.
///
/// Built in one step from the raw key/value map; the numeric view is derived
/// at construction, so every numeric key is also a raw key.
#[derive(Debug, Clone)]
pub struct Snapshot {
    timestamp: Instant,          // monotonic, used for rate math
    captured_at: DateTime<Local>, // wall clock, display only
    values: HashMap<String, f64>,
    raw: HashMap<String, String>,
}

impl Snapshot {
    pub fn new(timestamp: Instant, captured_at: DateTime<Local>, raw: HashMap<String, String>) -> Self {
        let values = raw
            .iter()
            .filter_map(|(key, value)| parse_number(value).map(|n| (key.clone(), n)))
            .collect();
        Self { timestamp, captured_at, values, raw }
    }

    /// Snapshot stamped with the current instant.
    pub fn capture(raw: HashMap<String, String>) -> Self {
        Self::new(Instant::now(), Local::now(), raw)
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Numeric value of `key`, or `0.0` when missing or non-numeric.
    pub fn value(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn numeric(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Original text of `key`, numeric or not.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &HashMap<String, f64> {
        &self.values
    }

    pub fn raw_values(&self) -> &HashMap<String, String> {
        &self.raw
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}
