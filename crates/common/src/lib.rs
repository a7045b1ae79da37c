pub mod format;
pub mod protocol;
pub mod rates;
pub mod snapshot;

pub use format::{format_bytes, format_bytes_rate, format_interval, format_uptime, yes_no};
pub use protocol::{parse_line, StatsLine, END_MARKER, STATS_REQUEST, STAT_MARKER};
pub use rates::{compute_rates, RateTable};
pub use snapshot::Snapshot;

pub const PRODUCT_NAME: &str = "memtop";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 11211;
