use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::debug;

use common::{parse_line, Snapshot, StatsLine, STATS_REQUEST};

/// Why a single stats sample failed. Every variant is recoverable: the next
/// tick simply tries again.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("connect to {addr}: timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("send stats request to {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("read stats from {addr}: {source}")]
    Read {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("stats from {addr}: no complete response within {timeout:?}")]
    Timeout { addr: String, timeout: Duration },
}

/// Something that can produce a fresh [`Snapshot`] on demand.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn sample(&self) -> Result<Snapshot, SampleError>;
}

/// Samples a memcached server over a fresh TCP connection per call.
#[derive(Clone, Debug)]
pub struct TcpStatsSource {
    addr: String,
    timeout: Duration,
}

impl TcpStatsSource {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self { addr: addr.into(), timeout }
    }
}

#[async_trait]
impl StatsSource for TcpStatsSource {
    async fn sample(&self) -> Result<Snapshot, SampleError> {
        fetch_stats(&self.addr, self.timeout).await
    }
}

/// Connect, send `stats`, and collect the response into a snapshot.
///
/// The connect is bounded by `limit`; the request/response exchange gets its
/// own deadline of `limit` once connected. The socket is dropped on return.
pub async fn fetch_stats(addr: &str, limit: Duration) -> Result<Snapshot, SampleError> {
    fetch_stats_via(addr, limit, TcpStream::connect).await
}

async fn fetch_stats_via<'a, C, F>(
    addr: &'a str,
    limit: Duration,
    connect: C,
) -> Result<Snapshot, SampleError>
where
    C: FnOnce(&'a str) -> F,
    F: Future<Output = io::Result<TcpStream>>,
{
    let stream = match timeout(limit, connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(source)) => {
            return Err(SampleError::Connect { addr: addr.to_string(), source });
        }
        Err(_) => {
            return Err(SampleError::ConnectTimeout { addr: addr.to_string(), timeout: limit });
        }
    };

    let deadline = Instant::now() + limit;
    match timeout_at(deadline, exchange(stream, addr)).await {
        Ok(result) => result,
        Err(_) => Err(SampleError::Timeout { addr: addr.to_string(), timeout: limit }),
    }
}

async fn exchange(mut stream: TcpStream, addr: &str) -> Result<Snapshot, SampleError> {
    stream
        .write_all(STATS_REQUEST.as_bytes())
        .await
        .map_err(|source| SampleError::Write { addr: addr.to_string(), source })?;

    let raw = read_stats(BufReader::new(&mut stream))
        .await
        .map_err(|source| SampleError::Read { addr: addr.to_string(), source })?;
    debug!(addr = %addr, stats = raw.len(), "stats response read");
    Ok(Snapshot::capture(raw))
}

/// Read response lines until `END` (or EOF), keeping every well-formed
/// `STAT` line. Malformed lines are skipped, not reported; bytes that are
/// not UTF-8 are replaced rather than failing the sample.
pub async fn read_stats<R>(mut reader: R) -> io::Result<HashMap<String, String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = HashMap::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(['\r', '\n']);
        match parse_line(line) {
            StatsLine::End => break,
            StatsLine::Stat { key, value } => {
                raw.insert(key.to_string(), value);
            }
            StatsLine::Skipped => {}
        }
    }
    Ok(raw)
}
