use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("unsupported input format '{extension}' ({path}); expected csv, xlsx, xlsm, xls, xlsb or ods")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("{path} contains no data")]
    Empty { path: PathBuf },
}
