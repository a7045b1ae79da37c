//! Line grammar of the memcached `stats` exchange.
//!
//! The request is a single line; the response is a run of
//! `STAT <key> <value...>` lines closed by `END`.

/// Request line sent on every sample.
pub const STATS_REQUEST: &str = "stats\r\n";
/// First token of every data line.
pub const STAT_MARKER: &str = "STAT";
/// Line that closes a response.
pub const END_MARKER: &str = "END";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsLine<'a> {
    Stat { key: &'a str, value: String },
    End,
    /// Short lines, foreign markers and anything else we do not understand.
    Skipped,
}

/// Classify one response line (line ending already stripped).
///
/// Values keep their inner words, joined with single spaces, so multi-word
/// values such as version banners survive tokenization.
pub fn parse_line(line: &str) -> StatsLine<'_> {
    if line == END_MARKER {
        return StatsLine::End;
    }
    let mut fields = line.split_whitespace();
    let (Some(marker), Some(key)) = (fields.next(), fields.next()) else {
        return StatsLine::Skipped;
    };
    if marker != STAT_MARKER {
        return StatsLine::Skipped;
    }
    let value = fields.collect::<Vec<_>>().join(" ");
    if value.is_empty() {
        return StatsLine::Skipped;
    }
    StatsLine::Stat { key, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_stat() {
        assert_eq!(
            parse_line("STAT cmd_get 42"),
            StatsLine::Stat { key: "cmd_get", value: "42".into() }
        );
    }

    #[test]
    fn rejoins_multi_word_values() {
        assert_eq!(
            parse_line("STAT version  1.6.9   (custom build)"),
            StatsLine::Stat { key: "version", value: "1.6.9 (custom build)".into() }
        );
    }

    #[test]
    fn terminator_must_match_exactly() {
        assert_eq!(parse_line("END"), StatsLine::End);
        assert_eq!(parse_line("END "), StatsLine::Skipped);
        assert_eq!(parse_line("end"), StatsLine::Skipped);
    }

    #[test]
    fn skips_short_and_foreign_lines() {
        assert_eq!(parse_line(""), StatsLine::Skipped);
        assert_eq!(parse_line("STAT"), StatsLine::Skipped);
        assert_eq!(parse_line("STAT pid"), StatsLine::Skipped);
        assert_eq!(parse_line("ITEM foo [5 b; 0 s]"), StatsLine::Skipped);
        assert_eq!(parse_line("ERROR"), StatsLine::Skipped);
    }
}
