use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use ersa_model::RawValue;

use crate::error::{IngestError, Result};

/// Reads the first worksheet of a workbook.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<RawValue>>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|err| workbook_error(err.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|err| workbook_error(err.to_string()))?;

    let rows: Vec<Vec<RawValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    tracing::debug!(path = %path.display(), sheet = %sheet, rows = rows.len(), "read worksheet rows");
    Ok(rows)
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Empty,
        Data::Int(value) => RawValue::Number(*value as f64),
        Data::Float(value) => RawValue::Number(*value),
        Data::Bool(true) => RawValue::Text("True".to_string()),
        Data::Bool(false) => RawValue::Text("False".to_string()),
        Data::String(text) => RawValue::from_text(text.as_str()),
        other => RawValue::from_text(other.to_string()),
    }
}
