use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to open snapshot feed '{path}': {source}")]
    OpenFeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read from snapshot feed: {source}")]
    ReadFeed {
        #[source]
        source: std::io::Error,
    },
}
