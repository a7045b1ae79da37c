use ratatui::text::{Line, Span};

use common::{format_bytes, format_bytes_rate, format_uptime, yes_no, RateTable, Snapshot};

use super::ThemeColors;

/// Metric rows for one snapshot, top to bottom. Empty lines are spacers.
pub fn snapshot_lines(snap: &Snapshot, rates: &RateTable, theme: &ThemeColors) -> Vec<Line<'static>> {
    let line = |label: &str, body: String| labeled(label, body, theme);

    let time = format!(
        "{}    Uptime: {}    Version: {}",
        snap.captured_at().format("%Y-%m-%d %H:%M:%S"),
        format_uptime(snap.value("uptime")),
        snap.raw("version").unwrap_or_default(),
    );

    let hits = snap.value("get_hits");
    let misses = snap.value("get_misses");
    let requests = format!(
        "hits {hits:.0}  misses {misses:.0}  hit ratio {:.2}%  evictions {:.0}  reclaimed {:.0}",
        percent(hits, hits + misses),
        snap.value("evictions"),
        snap.value("reclaimed"),
    );

    let used = snap.value("bytes");
    let limit = snap.value("limit_maxbytes");
    let memory = format!(
        "{} / {} ({:.1}%)   Free: {}",
        format_bytes(used),
        format_bytes(limit),
        percent(used, limit),
        format_bytes(limit - used),
    );

    let connections = format!(
        "current {:.0}  total {:.0}  reserved {:.0}  yields {:.0}  max {:.0}",
        snap.value("curr_connections"),
        snap.value("total_connections"),
        snap.value("reserved_fds"),
        snap.value("conn_yields"),
        snap.value("max_connections"),
    );

    let commands = format!(
        "get {:.2}  set {:.2}  delete {:.2}  incr {:.2}  decr {:.2}  touch {:.2}",
        rates.get("cmd_get"),
        rates.get("cmd_set"),
        rates.get("cmd_delete"),
        rates.sum(&["incr_hits", "incr_misses"]),
        rates.sum(&["decr_hits", "decr_misses"]),
        rates.sum(&["touch_hits", "touch_misses"]),
    );

    let bandwidth = format!(
        "read {}  write {}",
        format_bytes_rate(rates.get("bytes_read")),
        format_bytes_rate(rates.get("bytes_written")),
    );

    let items = format!(
        "current {:.0}  total {:.0}  expired {:.0}",
        snap.value("curr_items"),
        snap.value("total_items"),
        snap.value("expired_unfetched"),
    );

    let slabs = format!(
        "{:.0}  Threads: {:.0}  Accepting connections: {}",
        snap.value("slab_global_page_pool"),
        snap.value("threads"),
        yes_no(snap.value("accepting_conns") == 1.0),
    );

    vec![
        line("Time", time),
        line("Requests", requests),
        Line::default(),
        line("Memory", memory),
        line("Connections", connections),
        line("Commands/s", commands),
        line("Bandwidth/s", bandwidth),
        line("Items", items),
        line("Slabs", slabs),
    ]
}

fn labeled(label: &str, body: String, theme: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label()),
        Span::styled(body, theme.body()),
    ])
}

/// `part / whole` as a percentage, 0 when `whole` is not positive.
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::draw::{get_theme, ThemeKind};
    use std::collections::HashMap;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn snapshot(pairs: &[(&str, &str)]) -> Snapshot {
        let raw: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Snapshot::capture(raw)
    }

    #[test]
    fn hit_ratio_and_memory_percent_guard_zero() {
        let theme = get_theme(ThemeKind::Dark);
        let lines = snapshot_lines(&snapshot(&[]), &RateTable::default(), &theme);
        assert!(text(&lines[1]).contains("hit ratio 0.00%"));
        assert!(text(&lines[3]).contains("(0.0%)"));
        assert!(text(&lines[3]).contains("Free: 0 B"));
    }

    #[test]
    fn accepting_flag_requires_exactly_one() {
        let theme = get_theme(ThemeKind::Dark);
        let rates = RateTable::default();
        let on = snapshot_lines(&snapshot(&[("accepting_conns", "1")]), &rates, &theme);
        let off = snapshot_lines(&snapshot(&[("accepting_conns", "2")]), &rates, &theme);
        assert!(text(&on[8]).ends_with("Accepting connections: yes"));
        assert!(text(&off[8]).ends_with("Accepting connections: no"));
    }

    #[test]
    fn missing_version_renders_blank() {
        let theme = get_theme(ThemeKind::Light);
        let lines = snapshot_lines(&snapshot(&[("uptime", "0")]), &RateTable::default(), &theme);
        let time = text(&lines[0]);
        assert!(time.contains("Uptime: 0s"));
        assert!(time.ends_with("Version: "));
    }

    #[test]
    fn percent_helper() {
        assert_eq!(percent(80.0, 100.0), 80.0);
        assert_eq!(percent(5.0, 0.0), 0.0);
    }
}
