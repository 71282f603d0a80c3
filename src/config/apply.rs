use std::time::Duration;

use crate::args::{OutputFormat, PositiveU64, StatArgs};
use crate::error::{AppError, AppResult, ConfigError};
use crate::feed::FeedSource;
use crate::sinks::config::SinksConfig;
use crate::stats::TestProfile;

use super::types::ConfigFile;
use super::validate::{build_profile, select_stream};

/// Fully resolved options for one run: CLI flags applied over config values.
#[derive(Debug)]
pub struct RunOptions {
    pub profile: TestProfile,
    pub source: FeedSource,
    pub interval: Option<Duration>,
    pub output: Option<String>,
    pub output_format: OutputFormat,
    pub sinks: Option<SinksConfig>,
}

/// Merges CLI arguments with an optional config file and validates the
/// resulting topology.
///
/// # Errors
///
/// Returns an error when no snapshot source is provided, the pacing
/// interval is zero, or the stream/port tables fail validation.
pub fn resolve_options(args: &StatArgs, config: Option<ConfigFile>) -> AppResult<RunOptions> {
    let config = config.unwrap_or_default();

    let source = args
        .snapshots
        .clone()
        .or(config.snapshots)
        .map(|value| FeedSource::parse(&value))
        .ok_or_else(|| AppError::config(ConfigError::MissingSnapshotSource))?;

    let streams = config.streams.unwrap_or_default();
    let port_mapping = config.port_mapping.unwrap_or_default();
    let mut profile = build_profile(&streams, &port_mapping)?;
    if let Some(stream_id) = args.stream.or(config.stream) {
        profile = select_stream(profile, stream_id)?;
    }

    let interval_ms = match (args.interval_ms, config.interval_ms) {
        (Some(value), _) => Some(value),
        (None, Some(value)) => Some(PositiveU64::try_from(value).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "interval_ms".to_owned(),
                source: err,
            })
        })?),
        (None, None) => None,
    };

    Ok(RunOptions {
        profile,
        source,
        interval: interval_ms.map(|value| Duration::from_millis(value.get())),
        output: args.output.clone().or(config.output),
        output_format: args
            .output_format
            .or(config.output_format)
            .unwrap_or(OutputFormat::Text),
        sinks: config.sinks,
    })
}
