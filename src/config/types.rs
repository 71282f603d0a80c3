use serde::Deserialize;

use crate::args::OutputFormat;
use crate::sinks::config::SinksConfig;

/// On-disk configuration file. Everything is optional; CLI flags win over
/// config values.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub snapshots: Option<String>,
    pub interval_ms: Option<u64>,
    pub stream: Option<u32>,
    pub output: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub streams: Option<Vec<StreamConfig>>,
    pub port_mapping: Option<Vec<PortMapEntry>>,
    pub sinks: Option<SinksConfig>,
}

/// One configured stream entry.
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct StreamConfig {
    pub stream_id: u32,
    pub frame_size: u32,
}

/// One transmit-to-receive port pairing. TOML tables cannot use integer
/// keys, so the mapping is an array of explicit pairs.
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct PortMapEntry {
    pub tx_port: u32,
    pub rx_port: u32,
}
