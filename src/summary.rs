//! Final report rendering for the last published metrics update.

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::stats::{DerivedMetrics, MetricsUpdate, StreamId};

/// Renders the final update in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_report(update: &MetricsUpdate, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(text_report(update)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(update)?),
    }
}

fn text_report(update: &MetricsUpdate) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Snapshot #{}", update.sequence));
    if let Some(captured_at) = update.captured_at {
        lines.push(format!("Captured: {}", captured_at.to_rfc3339()));
    }
    for (stream_id, metrics) in &update.streams {
        lines.push(stream_line(*stream_id, metrics));
    }
    lines.join("\n")
}

fn stream_line(stream_id: StreamId, metrics: &DerivedMetrics) -> String {
    format!(
        "Stream {}: L2 TX {} / RX {}, L1 TX {} / RX {}, Loss {:.2}%",
        stream_id,
        format_bit_rate(metrics.tx_rate_l2),
        format_bit_rate(metrics.rx_rate_l2),
        format_bit_rate(metrics.tx_rate_l1),
        format_bit_rate(metrics.rx_rate_l1),
        metrics.loss_rate_percent
    )
}

/// Scales a bits/sec value into bit/Kbit/Mbit/Gbit units for display.
#[must_use]
pub fn format_bit_rate(bits: f64) -> String {
    const KBIT: f64 = 1_000.0;
    const MBIT: f64 = 1_000_000.0;
    const GBIT: f64 = 1_000_000_000.0;

    if bits >= GBIT {
        format!("{:.2} Gbit/s", bits / GBIT)
    } else if bits >= MBIT {
        format!("{:.2} Mbit/s", bits / MBIT)
    } else if bits >= KBIT {
        format!("{:.2} Kbit/s", bits / KBIT)
    } else {
        format!("{:.2} bit/s", bits)
    }
}
