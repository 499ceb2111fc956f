//! Run reports: the skipped-program CSV and a JSON run summary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use ersa_model::{GenerationOutcome, SkipRecord};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize summary {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Serialize)]
struct SkipRow<'a> {
    #[serde(rename = "Program")]
    program: &'a str,
    #[serde(rename = "Reason")]
    reason: &'a str,
}

/// Writes the skip report as CSV to any writer.
pub fn write_skip_csv<W: Write>(out: W, skipped: &[SkipRecord]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if skipped.is_empty() {
        writer.write_record(["Program", "Reason"])?;
    }
    for skip in skipped {
        writer.serialize(SkipRow {
            program: &skip.program_name,
            reason: &skip.reason,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `skipped` to `path` with a `Program,Reason` header, in input order.
pub fn write_skip_report(path: &Path, skipped: &[SkipRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_skip_csv(file, skipped).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), skipped = skipped.len(), "wrote skip report");
    Ok(())
}

/// Writes the full run outcome as pretty JSON.
pub fn write_summary_json(path: &Path, outcome: &GenerationOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}
