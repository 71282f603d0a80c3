//! Snapshot feed: replays newline-delimited JSON statistics snapshots from a
//! file or stdin into the collector channel, optionally paced for recorded
//! feeds.

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, AppResult, FeedError};
use crate::stats::StatisticsSnapshot;

/// Where snapshot lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(PathBuf),
    Stdin,
}

impl FeedSource {
    /// Parses a CLI/config source value; `-` selects stdin.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            FeedSource::Stdin
        } else {
            FeedSource::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::File(path) => write!(formatter, "{}", path.display()),
            FeedSource::Stdin => write!(formatter, "<stdin>"),
        }
    }
}

/// Counters for a completed feed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub delivered: u64,
    pub skipped: u64,
}

/// Spawns the feed task. Malformed lines are logged and skipped rather than
/// aborting the run: gaps and partial writes are normal in live telemetry.
/// The task ends at end-of-input or when the collector side hangs up.
///
/// The joined result is an error only when the source cannot be opened or
/// read.
#[must_use]
pub fn spawn_snapshot_feed(
    source: FeedSource,
    interval: Option<Duration>,
    snapshot_tx: mpsc::Sender<StatisticsSnapshot>,
) -> JoinHandle<AppResult<FeedStats>> {
    tokio::spawn(async move {
        match source {
            FeedSource::File(path) => {
                let file = tokio::fs::File::open(&path).await.map_err(|err| {
                    AppError::feed(FeedError::OpenFeed {
                        path: path.clone(),
                        source: err,
                    })
                })?;
                stream_snapshots(BufReader::new(file), interval, &snapshot_tx).await
            }
            FeedSource::Stdin => {
                stream_snapshots(BufReader::new(tokio::io::stdin()), interval, &snapshot_tx).await
            }
        }
    })
}

async fn stream_snapshots<R>(
    mut reader: BufReader<R>,
    interval: Option<Duration>,
    snapshot_tx: &mpsc::Sender<StatisticsSnapshot>,
) -> AppResult<FeedStats>
where
    R: AsyncRead + Unpin,
{
    let mut pacing = interval.map(|period| {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    });

    let mut stats = FeedStats::default();
    let mut line = String::new();
    let mut line_no: u64 = 0;

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .await
            .map_err(|err| AppError::feed(FeedError::ReadFeed { source: err }))?;
        if read == 0 {
            break;
        }
        line_no = line_no.saturating_add(1);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: StatisticsSnapshot = match serde_json::from_str(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                stats.skipped = stats.skipped.saturating_add(1);
                tracing::warn!("Skipping malformed snapshot on line {}: {}", line_no, err);
                continue;
            }
        };
        if let Some(ticker) = pacing.as_mut() {
            ticker.tick().await;
        }
        if snapshot_tx.send(parsed).await.is_err() {
            tracing::debug!("Snapshot channel closed; stopping feed early.");
            break;
        }
        stats.delivered = stats.delivered.saturating_add(1);
    }

    Ok(stats)
}
