use std::collections::BTreeMap;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a physical traffic-generator port.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Default,
)]
#[serde(transparent)]
pub struct PortId(pub u32);

impl std::fmt::Display for PortId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of a logical traffic stream, unique within a test session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Default,
)]
#[serde(transparent)]
pub struct StreamId(pub u32);

impl std::fmt::Display for StreamId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Wire frame size in bytes (Layer-2 frame length). Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize(NonZeroU32);

impl FrameSize {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for FrameSize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(FrameSize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for FrameSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        FrameSize::try_from(value)
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.get())
    }
}

/// Per-stream Layer-2 counters recorded on one port.
pub type StreamCounters = BTreeMap<StreamId, u64>;

/// Immutable point-in-time counter capture from the probe.
///
/// Ports not actively transmitting or receiving for a stream may be absent
/// from the respective map; absence means "no traffic recorded", never an
/// error. Counters are already rate-normalized by the producer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatisticsSnapshot {
    #[serde(default)]
    pub app_tx_l2: BTreeMap<PortId, StreamCounters>,
    #[serde(default)]
    pub app_rx_l2: BTreeMap<PortId, StreamCounters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

/// Pairing between transmit-side ports and the ports expected to receive
/// their traffic. TX counters are attributed to the keys, RX counters to the
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMapping(BTreeMap<PortId, PortId>);

impl PortMapping {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Maps `tx` to `rx`, returning the previous peer if `tx` was already
    /// mapped.
    pub fn insert(&mut self, tx: PortId, rx: PortId) -> Option<PortId> {
        self.0.insert(tx, rx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transmit-side ports of the mapping.
    #[must_use]
    pub fn tx_ports(&self) -> impl Iterator<Item = PortId> + '_ {
        self.0.keys().copied()
    }

    /// Receive-side peer ports of the mapping.
    #[must_use]
    pub fn rx_ports(&self) -> impl Iterator<Item = PortId> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(PortId, PortId)> for PortMapping {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (PortId, PortId)>,
    {
        Self(iter.into_iter().collect())
    }
}

/// Derived metric set for one stream. Rates are bits/sec; `tx_rate_l1` and
/// `rx_rate_l1` include the fixed per-frame Layer-1 overhead and are never
/// below their L2 counterparts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct DerivedMetrics {
    pub tx_rate_l2: f64,
    pub rx_rate_l2: f64,
    pub tx_rate_l1: f64,
    pub rx_rate_l1: f64,
    /// Percentage of transmitted traffic not observed as received, rounded
    /// to two decimals and clamped to [0, 100]. Zero without TX traffic.
    pub loss_rate_percent: f64,
}

/// One configured stream: its identifier and uniform wire frame size.
#[derive(Debug, Clone, Copy)]
pub struct StreamProfile {
    pub stream_id: StreamId,
    pub frame_size: FrameSize,
}

/// Validated runtime topology: the port mapping plus the configured streams.
#[derive(Debug, Clone)]
pub struct TestProfile {
    pub mapping: PortMapping,
    pub streams: Vec<StreamProfile>,
}

/// One collector publication. Consumers only ever need the newest value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetricsUpdate {
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    pub streams: BTreeMap<StreamId, DerivedMetrics>,
}
