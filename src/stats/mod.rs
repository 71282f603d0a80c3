mod aggregate;
mod collector;
mod types;


pub use aggregate::{L1_OVERHEAD_BYTES, aggregate};
pub use collector::setup_stats_collector;
pub use types::{
    DerivedMetrics, FrameSize, MetricsUpdate, PortId, PortMapping, StatisticsSnapshot,
    StreamCounters, StreamId, StreamProfile, TestProfile,
};
