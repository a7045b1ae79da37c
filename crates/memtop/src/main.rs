use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod sampler;
mod tui;

use config::{Cli, Config};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let config: Config = Cli::parse().into();

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    info!(
        address = %config.address,
        interval = ?config.interval,
        timeout = ?config.timeout,
        "memtop starting"
    );

    tui::run_tui(config).await
}

/// Route tracing output to `path`; stdout belongs to the dashboard.
/// Level comes from `RUST_LOG`, defaulting to `info`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
