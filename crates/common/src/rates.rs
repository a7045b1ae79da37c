use std::collections::HashMap;

use crate::snapshot::Snapshot;

/// Per-second deltas between two snapshots. Never negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Rate for `key`, `0.0` when the key has no entry.
    pub fn get(&self, key: &str) -> f64 {
        self.rates.get(key).copied().unwrap_or(0.0)
    }

    /// Sum of the rates of several keys (e.g. `incr_hits` + `incr_misses`).
    pub fn sum(&self, keys: &[&str]) -> f64 {
        keys.iter().map(|k| self.get(k)).sum()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Derive per-second rates for keys numeric in both snapshots.
///
/// Returns an empty table when either side is missing or the elapsed time is
/// not strictly positive. A counter that went down (server restart) yields 0.
pub fn compute_rates(current: Option<&Snapshot>, previous: Option<&Snapshot>) -> RateTable {
    let (Some(current), Some(previous)) = (current, previous) else {
        return RateTable::default();
    };
    // `checked_duration_since` is None when the clock went backwards
    let elapsed = match current.timestamp().checked_duration_since(previous.timestamp()) {
        Some(d) if !d.is_zero() => d.as_secs_f64(),
        _ => return RateTable::default(),
    };

    let rates = current
        .values()
        .iter()
        .filter_map(|(key, cur)| {
            let prev = previous.numeric(key)?;
            let delta = (cur - prev).max(0.0);
            Some((key.clone(), delta / elapsed))
        })
        .collect();
    RateTable { rates }
}
