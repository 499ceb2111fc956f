use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    #[error("failed to read mapping {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write mapping {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
