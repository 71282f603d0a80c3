use clap::Parser;

use super::types::{OutputFormat, PositiveU64};

/// Aggregates traffic-generator counter snapshots into per-stream L1/L2 bit
/// rates and loss percentages.
#[derive(Debug, Parser)]
#[command(name = "tgstat", version, about)]
pub struct StatArgs {
    /// Path to a tgstat.toml or tgstat.json configuration file.
    #[arg(short, long, env = "TGSTAT_CONFIG")]
    pub config: Option<String>,

    /// Snapshot feed: a JSONL file path, or `-` for stdin.
    #[arg(short, long)]
    pub snapshots: Option<String>,

    /// Restrict aggregation to a single stream id.
    #[arg(long)]
    pub stream: Option<u32>,

    /// Pacing interval between replayed snapshots, in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<PositiveU64>,

    /// Write the final metrics report to this path instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Format of the final metrics report.
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
