use std::collections::BTreeSet;

use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::stats::{FrameSize, PortId, PortMapping, StreamId, StreamProfile, TestProfile};

use super::types::{PortMapEntry, StreamConfig};

/// Largest accepted wire frame size: jumbo frames up to 9216 bytes.
pub const MAX_FRAME_SIZE: u32 = 9216;

/// Builds and validates the runtime profile from the config tables.
///
/// # Errors
///
/// Returns an error for an empty stream set, duplicate stream ids, frame
/// sizes outside `(0, MAX_FRAME_SIZE]`, an empty port mapping, or a
/// transmit port mapped more than once.
pub fn build_profile(streams: &[StreamConfig], mapping: &[PortMapEntry]) -> AppResult<TestProfile> {
    if streams.is_empty() {
        return Err(AppError::validation(ValidationError::NoStreams));
    }

    let mut seen_streams = BTreeSet::new();
    let mut profiles = Vec::with_capacity(streams.len());
    for stream in streams {
        if !seen_streams.insert(stream.stream_id) {
            return Err(AppError::validation(ValidationError::DuplicateStreamId {
                stream_id: stream.stream_id,
            }));
        }
        if stream.frame_size > MAX_FRAME_SIZE {
            return Err(AppError::validation(ValidationError::FrameSizeTooLarge {
                value: stream.frame_size,
                max: MAX_FRAME_SIZE,
            }));
        }
        let frame_size = FrameSize::try_from(stream.frame_size).map_err(|err| {
            AppError::config(ConfigError::InvalidFrameSize {
                stream_id: stream.stream_id,
                source: err,
            })
        })?;
        profiles.push(StreamProfile {
            stream_id: StreamId(stream.stream_id),
            frame_size,
        });
    }

    if mapping.is_empty() {
        return Err(AppError::validation(ValidationError::EmptyPortMapping));
    }
    let mut ports = PortMapping::new();
    for entry in mapping {
        if ports
            .insert(PortId(entry.tx_port), PortId(entry.rx_port))
            .is_some()
        {
            return Err(AppError::validation(ValidationError::DuplicateTxPort {
                port: entry.tx_port,
            }));
        }
    }

    Ok(TestProfile {
        mapping: ports,
        streams: profiles,
    })
}

/// Restricts the profile to a single selected stream id.
///
/// # Errors
///
/// Returns an error when `stream_id` names a stream absent from the profile.
pub fn select_stream(profile: TestProfile, stream_id: u32) -> AppResult<TestProfile> {
    let selected: Vec<StreamProfile> = profile
        .streams
        .iter()
        .copied()
        .filter(|stream| stream.stream_id == StreamId(stream_id))
        .collect();
    if selected.is_empty() {
        return Err(AppError::validation(ValidationError::UnknownStream {
            stream_id,
        }));
    }
    Ok(TestProfile {
        mapping: profile.mapping,
        streams: selected,
    })
}
