//! Tabular input for program generation.
//!
//! Loads a CSV file or the first worksheet of a spreadsheet workbook into a
//! [`RecordSet`](ersa_model::RecordSet). The first non-empty row holds the
//! column names; every following non-empty row becomes one record.

mod csv_source;
mod error;
mod format;
mod header;
mod table;
mod workbook;

pub use error::{IngestError, Result};
pub use format::SourceFormat;
pub use header::{normalize_header, unique_headers};

use std::path::Path;

use ersa_model::RecordSet;

/// Reads every record from `path`.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let format = SourceFormat::from_path(path)?;
    let rows = match format {
        SourceFormat::Csv => csv_source::read_rows(path)?,
        SourceFormat::Workbook => workbook::read_rows(path)?,
    };
    let records = table::assemble(rows).ok_or_else(|| IngestError::Empty {
        path: path.to_path_buf(),
    })?;
    tracing::info!(
        path = %path.display(),
        ?format,
        columns = records.columns.len(),
        records = records.len(),
        "loaded input data"
    );
    Ok(records)
}

/// Column names of `path` in source order.
pub fn list_columns(path: &Path) -> Result<Vec<String>> {
    Ok(read_records(path)?.columns)
}
