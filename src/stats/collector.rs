use std::collections::BTreeMap;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::shutdown::ShutdownSender;

use super::aggregate::aggregate;
use super::types::{MetricsUpdate, StatisticsSnapshot, TestProfile};

/// Spawns the collector task: one aggregation pass per snapshot arrival,
/// published through the watch channel so readers always observe only the
/// most recent result.
///
/// The task ends when the snapshot channel closes or shutdown fires and
/// returns the last published update, if any, as the final report.
#[must_use]
pub fn setup_stats_collector(
    profile: TestProfile,
    shutdown_tx: &ShutdownSender,
    mut snapshot_rx: mpsc::Receiver<StatisticsSnapshot>,
    update_tx: watch::Sender<MetricsUpdate>,
) -> JoinHandle<Option<MetricsUpdate>> {
    let mut shutdown_rx = shutdown_tx.subscribe();

    tokio::spawn(async move {
        let mut last: Option<MetricsUpdate> = None;
        let mut sequence: u64 = 0;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                maybe_snapshot = snapshot_rx.recv() => {
                    let snapshot = match maybe_snapshot {
                        Some(snapshot) => snapshot,
                        None => break,
                    };
                    sequence = sequence.saturating_add(1);
                    let update = process_snapshot(&profile, &snapshot, sequence);
                    for (stream_id, metrics) in &update.streams {
                        tracing::debug!(
                            "snapshot #{} stream {}: tx_l2={} rx_l2={} loss={}%",
                            sequence,
                            stream_id,
                            metrics.tx_rate_l2,
                            metrics.rx_rate_l2,
                            metrics.loss_rate_percent
                        );
                    }
                    drop(update_tx.send(update.clone()));
                    last = Some(update);
                }
            }
        }

        last
    })
}

/// One full aggregation pass: every configured stream against one snapshot.
pub(crate) fn process_snapshot(
    profile: &TestProfile,
    snapshot: &StatisticsSnapshot,
    sequence: u64,
) -> MetricsUpdate {
    let mut streams = BTreeMap::new();
    for stream in &profile.streams {
        let metrics = aggregate(snapshot, &profile.mapping, stream.stream_id, stream.frame_size);
        streams.insert(stream.stream_id, metrics);
    }
    MetricsUpdate {
        sequence,
        captured_at: snapshot.captured_at,
        streams,
    }
}
