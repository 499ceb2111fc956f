use std::path::Path;

use csv::ReaderBuilder;

use ersa_model::RawValue;

use crate::error::{IngestError, Result};

/// Reads every CSV row as text cells; blank cells become `Empty`.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<RawValue>>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(RawValue::from_text).collect());
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "read csv rows");
    Ok(rows)
}
