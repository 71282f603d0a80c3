use std::collections::BTreeMap;

use super::types::{
    DerivedMetrics, FrameSize, PortId, PortMapping, StatisticsSnapshot, StreamCounters, StreamId,
};

/// Fixed per-frame Layer-1 overhead in bytes (preamble, inter-frame gap and
/// frame check sequence) added atop the Layer-2 frame when scaling L2 rates
/// up to L1.
pub const L1_OVERHEAD_BYTES: u32 = 20;

/// Derives TX/RX rates and loss for `stream_id` from one counter snapshot.
///
/// TX counters are summed over the mapping's transmit-side ports, RX
/// counters over their paired receive-side peers: a stream's traffic is
/// generated on one port and expected to arrive on its mapped peer. Ports or
/// stream entries absent from the snapshot contribute zero; intermittent
/// absence is normal in live telemetry and never an error. The aggregated L2
/// totals are already rate-normalized by the producer, so no time-window
/// division happens here.
///
/// The L1 scaling is only valid when all frames of the stream share
/// `frame_size`, which the type encodes per stream.
#[must_use]
pub fn aggregate(
    snapshot: &StatisticsSnapshot,
    mapping: &PortMapping,
    stream_id: StreamId,
    frame_size: FrameSize,
) -> DerivedMetrics {
    let tx_total = sum_mapped_counters(&snapshot.app_tx_l2, mapping.tx_ports(), stream_id);
    let rx_total = sum_mapped_counters(&snapshot.app_rx_l2, mapping.rx_ports(), stream_id);

    let tx_rate_l2 = tx_total as f64;
    let rx_rate_l2 = rx_total as f64;
    let scale = l1_scale(frame_size);

    DerivedMetrics {
        tx_rate_l2,
        rx_rate_l2,
        tx_rate_l1: tx_rate_l2 * scale,
        rx_rate_l1: rx_rate_l2 * scale,
        loss_rate_percent: loss_percent(tx_rate_l2, rx_rate_l2),
    }
}

fn sum_mapped_counters(
    counters: &BTreeMap<PortId, StreamCounters>,
    ports: impl Iterator<Item = PortId>,
    stream_id: StreamId,
) -> u64 {
    ports.fold(0u64, |total, port| {
        let value = counters
            .get(&port)
            .and_then(|streams| streams.get(&stream_id))
            .copied()
            .unwrap_or(0);
        total.saturating_add(value)
    })
}

/// Ratio of the full on-wire frame to its Layer-2 length; always >= 1.
fn l1_scale(frame_size: FrameSize) -> f64 {
    let frame = f64::from(frame_size.get());
    (frame + f64::from(L1_OVERHEAD_BYTES)) / frame
}

/// Loss floors at zero: RX exceeding TX (transient counter skew, duplicate
/// counting) reports 0.00 rather than negative loss.
fn loss_percent(tx_rate_l2: f64, rx_rate_l2: f64) -> f64 {
    if tx_rate_l2 <= 0.0 {
        return 0.0;
    }
    let lost = 1.0 - rx_rate_l2 / tx_rate_l2;
    if lost <= 0.0 {
        return 0.0;
    }
    round_to_hundredths((lost * 100.0).min(100.0))
}

/// Two decimal places, the resolution the dashboard displays.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
