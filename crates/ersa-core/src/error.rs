use std::path::PathBuf;

use thiserror::Error;

use ersa_template::TemplateError;

/// Run-level failures. Per-record problems never surface here; they are
/// collected in the run outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SinkError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] TemplateError),

    #[error("output buffer lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("record index {index} out of range for {count} records")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("{field} overflows: start {start} + index {index}")]
    Overflow {
        field: &'static str,
        start: i64,
        index: usize,
    },
}
