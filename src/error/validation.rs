use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Frame size {value}B exceeds maximum of {max}B.")]
    FrameSizeTooLarge { value: u32, max: u32 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("No streams configured.")]
    NoStreams,
    #[error("Duplicate stream id {stream_id} in configuration.")]
    DuplicateStreamId { stream_id: u32 },
    #[error("No port mapping configured.")]
    EmptyPortMapping,
    #[error("Transmit port {port} mapped more than once.")]
    DuplicateTxPort { port: u32 },
    #[error("Stream id {stream_id} is not configured.")]
    UnknownStream { stream_id: u32 },
}
