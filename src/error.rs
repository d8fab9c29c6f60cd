use std::path::PathBuf;
use thiserror::Error;

/// A single failed HTTP attempt. Retried by the fetcher, never surfaced past it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(Box::new(e))
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not write snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site list {path:?} could not be opened: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("site list {0:?} contains no usable sites")]
    Empty(PathBuf),
}
