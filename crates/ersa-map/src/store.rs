use std::fs;
use std::path::{Path, PathBuf};

use ersa_model::{ColumnMapping, LogicalParameter, UNMAPPED};

use crate::error::{MapError, Result};

/// File name used when no mapping path is given.
pub const DEFAULT_MAPPING_FILE: &str = "column_mapping_config.json";

/// A mapping file on disk.
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the mapping. Returns `None` if the file does not exist.
    pub fn load(&self) -> Result<Option<ColumnMapping>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved mapping");
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| MapError::Read {
            path: self.path.clone(),
            source,
        })?;
        let mapping: ColumnMapping =
            serde_json::from_str(&contents).map_err(|source| MapError::Json {
                path: self.path.clone(),
                source,
            })?;
        for (key, column) in mapping.entries() {
            if LogicalParameter::from_key(key).is_none() {
                tracing::debug!(key, column, "keeping mapping entry for unknown parameter");
            }
        }
        tracing::info!(path = %self.path.display(), "loaded column mapping");
        Ok(Some(mapping))
    }

    /// Writes `mapping` as pretty JSON. Logical parameters without a column
    /// are written as the unmapped sentinel so the file always lists all four.
    pub fn save(&self, mapping: &ColumnMapping) -> Result<()> {
        let mut complete = mapping.clone();
        for param in LogicalParameter::ALL {
            if !complete.entries().any(|(key, _)| key == param.key()) {
                complete.set_key(param.key(), UNMAPPED);
            }
        }
        let json = serde_json::to_string_pretty(&complete).map_err(|source| MapError::Json {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| MapError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| MapError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "saved column mapping");
        Ok(())
    }
}
