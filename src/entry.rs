use clap::Parser;
use tokio::sync::{broadcast, mpsc, watch};

use crate::args::StatArgs;
use crate::config::{RunOptions, load_config, resolve_options};
use crate::error::AppResult;
use crate::feed::spawn_snapshot_feed;
use crate::logger;
use crate::sinks::writers::write_sinks;
use crate::stats::{MetricsUpdate, setup_stats_collector};
use crate::summary::render_report;

/// Snapshot channel depth; the feed blocks when the collector falls behind.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

pub(crate) fn run() -> AppResult<()> {
    let args = StatArgs::parse();
    logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: StatArgs) -> AppResult<()> {
    let config = load_config(args.config.as_deref())?;
    let options = resolve_options(&args, config)?;
    let RunOptions {
        profile,
        source,
        interval,
        output,
        output_format,
        sinks,
    } = options;

    let (shutdown_tx, _) = broadcast::channel(SHUTDOWN_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
    let (update_tx, update_rx) = watch::channel(MetricsUpdate::default());

    let shutdown_signal = shutdown_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received; shutting down.");
            drop(shutdown_signal.send(()));
        }
    });

    tracing::info!(
        "Aggregating {} stream(s) across {} port pair(s) from {}",
        profile.streams.len(),
        profile.mapping.len(),
        source
    );

    let collector = setup_stats_collector(profile, &shutdown_tx, snapshot_rx, update_tx);
    let feed = spawn_snapshot_feed(source, interval, snapshot_tx);

    let sink_task = sinks.map(|sinks| {
        let mut sink_rx = update_rx;
        tokio::spawn(async move {
            while sink_rx.changed().await.is_ok() {
                let update = sink_rx.borrow_and_update().clone();
                if let Err(err) = write_sinks(&sinks, &update).await {
                    tracing::warn!("Sink write failed: {}", err);
                }
            }
        })
    });

    let feed_stats = feed.await??;
    let last_update = collector.await?;
    if let Some(task) = sink_task {
        task.await?;
    }

    tracing::info!(
        "Feed complete: {} snapshot(s) delivered, {} skipped",
        feed_stats.delivered,
        feed_stats.skipped
    );

    match last_update {
        Some(update) => {
            let report = render_report(&update, output_format)?;
            match output {
                Some(path) => tokio::fs::write(&path, report).await?,
                None => println!("{}", report),
            }
        }
        None => tracing::warn!("No snapshots processed; nothing to report."),
    }

    Ok(())
}
