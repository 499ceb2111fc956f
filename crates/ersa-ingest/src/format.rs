use std::path::Path;

use crate::error::{IngestError, Result};

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Input container, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension == "csv" {
            Ok(Self::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Workbook)
        } else {
            Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    }
}
