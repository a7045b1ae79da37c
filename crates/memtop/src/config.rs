use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use common::{DEFAULT_HOST, DEFAULT_PORT};

use crate::tui::draw::ThemeKind;

#[derive(Debug, Parser)]
#[command(name = "memtop")]
#[command(about = "Live terminal dashboard for a memcached server", version)]
pub struct Cli {
    /// memcached host (overrides --host)
    #[arg(value_name = "HOST")]
    pub host_arg: Option<String>,

    /// memcached port (overrides --port)
    #[arg(value_name = "PORT")]
    pub port_arg: Option<u16>,

    /// memcached host
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// memcached port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Refresh interval (e.g. 500ms, 2s, 1m)
    #[arg(short, long, default_value = "2s", value_parser = parse_duration)]
    pub interval: Duration,

    /// Network timeout for each stats request
    #[arg(long, default_value = "2s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,

    /// Write logs to this file (the terminal is owned by the dashboard)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for ThemeKind {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => ThemeKind::Dark,
            ThemeArg::Light => ThemeKind::Light,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub address: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub theme: ThemeKind,
    pub log_file: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let host = cli.host_arg.unwrap_or(cli.host);
        let port = cli.port_arg.unwrap_or(cli.port);
        Self {
            address: format_address(&host, port),
            interval: cli.interval,
            timeout: cli.timeout,
            theme: cli.theme.into(),
            log_file: cli.log_file,
        }
    }
}

fn format_address(host: &str, port: u16) -> String {
    // bare IPv6 literals need brackets to be dialable
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Parse `500ms`, `2s`, `1m`, `1h` or a bare number of seconds. Zero is rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration {s:?}"))?;
    let secs = match unit.trim() {
        "ms" => value / 1_000.0,
        "" | "s" => value,
        "m" => value * 60.0,
        "h" => value * 3_600.0,
        other => return Err(format!("unknown duration unit {other:?} (use ms, s, m or h)")),
    };
    let duration = Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("invalid duration {s:?}: {e}"))?;
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let argv = std::iter::once("memtop").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn defaults_to_local_memcached() {
        let cfg = config(&[]);
        assert_eq!(cfg.address, "127.0.0.1:11211");
        assert_eq!(cfg.interval, Duration::from_secs(2));
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert_eq!(cfg.theme, ThemeKind::Dark);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn positional_arguments_override_flags() {
        let cfg = config(&["--host", "cache-a", "--port", "1234", "cache-b"]);
        assert_eq!(cfg.address, "cache-b:1234");

        let cfg = config(&["--host", "cache-a", "--port", "1234", "cache-b", "22122"]);
        assert_eq!(cfg.address, "cache-b:22122");
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        assert_eq!(config(&["::1"]).address, "[::1]:11211");
        assert_eq!(config(&["[::1]", "1"]).address, "[::1]:1");
    }

    #[test]
    fn invalid_port_is_a_usage_error() {
        let err = Cli::try_parse_from(["memtop", "localhost", "eleven"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(Cli::try_parse_from(["memtop", "--port", "70000"]).is_err());
    }

    #[test]
    fn interval_and_theme_flags() {
        let cfg = config(&["-i", "500ms", "--timeout", "1", "--theme", "light"]);
        assert_eq!(cfg.interval, Duration::from_millis(500));
        assert_eq!(cfg.timeout, Duration::from_secs(1));
        assert_eq!(cfg.theme, ThemeKind::Light);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("3"), Ok(Duration::from_secs(3)));
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("2d").is_err());
        assert!(parse_duration("").is_err());
    }
}
