use std::path::PathBuf;

use crate::error::{AppError, AppResult, SinkError};
use crate::stats::{DerivedMetrics, MetricsUpdate};

use super::config::{InfluxSinkConfig, JsonSinkConfig, PrometheusSinkConfig, SinksConfig};
use super::format::{format_rate, write_line};

/// Write configured sink outputs to their destinations.
///
/// # Errors
///
/// Returns an error if any sink output fails to serialize or write.
pub async fn write_sinks(config: &SinksConfig, update: &MetricsUpdate) -> AppResult<()> {
    if let Some(prom) = config.prometheus.as_ref() {
        write_prometheus(prom, update).await?;
    }
    if let Some(influx) = config.influx.as_ref() {
        write_influx(influx, update).await?;
    }
    if let Some(json) = config.json.as_ref() {
        write_json(json, update).await?;
    }
    Ok(())
}

const GAUGE_FAMILIES: [(&str, &str, fn(&DerivedMetrics) -> f64); 5] = [
    (
        "tgstat_tx_rate_l2_bits",
        "Transmit rate at Layer 2 in bits/sec.",
        |metrics| metrics.tx_rate_l2,
    ),
    (
        "tgstat_rx_rate_l2_bits",
        "Receive rate at Layer 2 in bits/sec.",
        |metrics| metrics.rx_rate_l2,
    ),
    (
        "tgstat_tx_rate_l1_bits",
        "Transmit rate at Layer 1 in bits/sec.",
        |metrics| metrics.tx_rate_l1,
    ),
    (
        "tgstat_rx_rate_l1_bits",
        "Receive rate at Layer 1 in bits/sec.",
        |metrics| metrics.rx_rate_l1,
    ),
    (
        "tgstat_loss_rate_percent",
        "Share of transmitted traffic not observed as received.",
        |metrics| metrics.loss_rate_percent,
    ),
];

async fn write_prometheus(config: &PrometheusSinkConfig, update: &MetricsUpdate) -> AppResult<()> {
    let mut output = String::new();

    write_line(
        &mut output,
        "# HELP tgstat_snapshot_sequence Sequence number of the latest snapshot.",
    )?;
    write_line(&mut output, "# TYPE tgstat_snapshot_sequence counter")?;
    write_line(
        &mut output,
        &format!("tgstat_snapshot_sequence {}", update.sequence),
    )?;

    for (name, help, select) in GAUGE_FAMILIES {
        write_line(&mut output, &format!("# HELP {} {}", name, help))?;
        write_line(&mut output, &format!("# TYPE {} gauge", name))?;
        for (stream_id, metrics) in &update.streams {
            write_line(
                &mut output,
                &format!(
                    "{}{{stream=\"{}\"}} {}",
                    name,
                    stream_id,
                    format_rate(select(metrics))
                ),
            )?;
        }
    }

    tokio::fs::write(&config.path, output).await.map_err(|err| {
        AppError::sink(SinkError::Write {
            context: "Prometheus",
            path: PathBuf::from(&config.path),
            source: err,
        })
    })?;
    Ok(())
}

async fn write_influx(config: &InfluxSinkConfig, update: &MetricsUpdate) -> AppResult<()> {
    let mut output = String::new();
    for (stream_id, metrics) in &update.streams {
        write_line(
            &mut output,
            &format!(
                "tgstat_stream,stream={} tx_rate_l2={},rx_rate_l2={},tx_rate_l1={},rx_rate_l1={},loss_rate_percent={},sequence={}i",
                stream_id,
                format_rate(metrics.tx_rate_l2),
                format_rate(metrics.rx_rate_l2),
                format_rate(metrics.tx_rate_l1),
                format_rate(metrics.rx_rate_l1),
                format_rate(metrics.loss_rate_percent),
                update.sequence
            ),
        )?;
    }

    tokio::fs::write(&config.path, output).await.map_err(|err| {
        AppError::sink(SinkError::Write {
            context: "Influx",
            path: PathBuf::from(&config.path),
            source: err,
        })
    })?;
    Ok(())
}

async fn write_json(config: &JsonSinkConfig, update: &MetricsUpdate) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(update).map_err(|err| {
        AppError::sink(SinkError::Serialize {
            context: "JSON",
            source: err,
        })
    })?;
    tokio::fs::write(&config.path, json).await.map_err(|err| {
        AppError::sink(SinkError::Write {
            context: "JSON",
            path: PathBuf::from(&config.path),
            source: err,
        })
    })?;
    Ok(())
}
