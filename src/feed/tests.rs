use std::future::Future;
use std::path::PathBuf;

use tokio::sync::mpsc;

use super::{FeedSource, spawn_snapshot_feed};
use crate::stats::{PortId, StatisticsSnapshot, StreamId};

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime build failed: {}", err))?;
    runtime.block_on(future)
}

#[test]
fn dash_selects_stdin() -> Result<(), String> {
    if FeedSource::parse("-") != FeedSource::Stdin {
        return Err("expected stdin source".to_owned());
    }
    if FeedSource::parse("feed.jsonl") != FeedSource::File(PathBuf::from("feed.jsonl")) {
        return Err("expected file source".to_owned());
    }
    Ok(())
}

#[test]
fn feed_delivers_and_skips() -> Result<(), String> {
    run_async_test(async {
        let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let path = dir.path().join("feed.jsonl");
        let content = concat!(
            "{\"app_tx_l2\":{\"1\":{\"5\":1000}},\"app_rx_l2\":{\"2\":{\"5\":800}}}\n",
            "\n",
            "not json\n",
            "{\"app_tx_l2\":{\"1\":{\"5\":2000}},\"app_rx_l2\":{\"2\":{\"5\":2000}}}\n",
        );
        tokio::fs::write(&path, content)
            .await
            .map_err(|err| format!("write failed: {}", err))?;

        let (snapshot_tx, mut snapshot_rx) = mpsc::channel(8);
        let feed = spawn_snapshot_feed(
            FeedSource::File(path),
            None,
            snapshot_tx,
        );

        let mut received: Vec<StatisticsSnapshot> = Vec::new();
        while let Some(snapshot) = snapshot_rx.recv().await {
            received.push(snapshot);
        }

        let stats = feed
            .await
            .map_err(|err| format!("feed join failed: {}", err))?
            .map_err(|err| format!("feed failed: {}", err))?;

        if stats.delivered != 2 || stats.skipped != 1 {
            return Err(format!(
                "expected 2 delivered / 1 skipped, got {} / {}",
                stats.delivered, stats.skipped
            ));
        }
        let first = received
            .first()
            .ok_or_else(|| "missing first snapshot".to_owned())?;
        let counter = first
            .app_tx_l2
            .get(&PortId(1))
            .and_then(|streams| streams.get(&StreamId(5)))
            .copied();
        if counter != Some(1000) {
            return Err(format!("unexpected first tx counter: {:?}", counter));
        }
        Ok(())
    })
}

#[test]
fn feed_errors_on_missing_file() -> Result<(), String> {
    run_async_test(async {
        let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let path = dir.path().join("absent.jsonl");

        let (snapshot_tx, _snapshot_rx) = mpsc::channel(1);
        let feed = spawn_snapshot_feed(FeedSource::File(path), None, snapshot_tx);

        let result = feed
            .await
            .map_err(|err| format!("feed join failed: {}", err))?;
        if result.is_ok() {
            return Err("expected an error for a missing feed file".to_owned());
        }
        Ok(())
    })
}

#[test]
fn feed_stops_when_collector_hangs_up() -> Result<(), String> {
    run_async_test(async {
        let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let path = dir.path().join("feed.jsonl");
        let content = concat!(
            "{\"app_tx_l2\":{\"1\":{\"5\":1}},\"app_rx_l2\":{}}\n",
            "{\"app_tx_l2\":{\"1\":{\"5\":2}},\"app_rx_l2\":{}}\n",
        );
        tokio::fs::write(&path, content)
            .await
            .map_err(|err| format!("write failed: {}", err))?;

        let (snapshot_tx, snapshot_rx) = mpsc::channel(8);
        drop(snapshot_rx);
        let feed = spawn_snapshot_feed(FeedSource::File(path), None, snapshot_tx);

        let stats = feed
            .await
            .map_err(|err| format!("feed join failed: {}", err))?
            .map_err(|err| format!("feed failed: {}", err))?;
        if stats.delivered != 0 {
            return Err(format!(
                "expected no deliveries after hang-up, got {}",
                stats.delivered
            ));
        }
        Ok(())
    })
}
