use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to format sink line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Failed to serialize {context} sink: {source}")]
    Serialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write {context} sink '{path}': {source}")]
    Write {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
