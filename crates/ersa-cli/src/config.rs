//! Run configuration: metadata settings and parameter overrides.
//!
//! Values come from an optional JSON file and are then patched by command
//! line flags. Every field is optional in the file:
//!
//! ```json
//! {
//!   "metadata": { "program_id_start": 20000, "user_id": 12 },
//!   "overrides": [
//!     { "column": "Zone1 Top", "path": "enmProg|enmHzOben|1|enmSngSollTemp" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use ersa_model::{MetadataSettings, ParameterOverride};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub metadata: MetadataSettings,
    pub overrides: Vec<ParameterOverride>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read run config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse run config {}", path.display()))
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Metadata flags. Each one, when given, replaces the configured value.
#[derive(Debug, Clone, Default, Args)]
pub struct MetadataArgs {
    /// First program id; record N gets start + N - 1.
    #[arg(long = "program-id-start", value_name = "ID")]
    pub program_id_start: Option<i64>,

    /// First history id; record N gets start + N - 1.
    #[arg(long = "history-id-start", value_name = "ID")]
    pub history_id_start: Option<i64>,

    #[arg(long = "library-id", value_name = "ID")]
    pub library_id: Option<i64>,

    #[arg(long = "set-number", value_name = "N")]
    pub set_number: Option<i64>,

    #[arg(long = "version-number", value_name = "N")]
    pub version: Option<i64>,

    /// User id written as creation and change user.
    #[arg(long = "user-id", value_name = "ID")]
    pub user_id: Option<i64>,

    #[arg(long = "notes", value_name = "TEXT")]
    pub notes: Option<String>,
}

impl MetadataArgs {
    pub fn apply_to(&self, settings: &mut MetadataSettings) {
        let numbers = [
            (self.program_id_start, &mut settings.program_id_start),
            (self.history_id_start, &mut settings.history_id_start),
            (self.library_id, &mut settings.library_id),
            (self.set_number, &mut settings.set_number),
            (self.version, &mut settings.version),
            (self.user_id, &mut settings.user_id),
        ];
        for (flag, slot) in numbers {
            if let Some(value) = flag {
                *slot = value;
            }
        }
        if let Some(notes) = &self.notes {
            settings.notes.clone_from(notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use ersa_model::ParameterKind;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"metadata": {"user_id": 12}}"#).expect("parse");
        assert_eq!(config.metadata.user_id, 12);
        assert_eq!(config.metadata.program_id_start, 10000);
        assert_eq!(config.metadata.notes, "Auto-generated by ERSA tool");
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn overrides_parse_with_kinds() {
        let config: RunConfig = serde_json::from_str(
            r#"{"overrides": [
                {"column": "Z1", "path": "enmProg|enmHzOben|1|enmSngSollTemp"},
                {"column": "N2", "path": "enmProg|enmN2|enmBlnSollAktiv", "kind": "boolean"}
            ]}"#,
        )
        .expect("parse");
        assert_eq!(config.overrides.len(), 2);
        assert_eq!(config.overrides[0].kind, ParameterKind::Numeric);
        assert_eq!(config.overrides[1].kind, ParameterKind::Boolean);
    }

    #[test]
    fn flags_take_precedence() {
        let mut settings = MetadataSettings {
            program_id_start: 500,
            ..MetadataSettings::default()
        };
        let args = MetadataArgs {
            program_id_start: Some(20000),
            user_id: Some(3),
            notes: Some("night shift".to_string()),
            ..MetadataArgs::default()
        };
        args.apply_to(&mut settings);
        assert_eq!(settings.program_id_start, 20000);
        assert_eq!(settings.user_id, 3);
        assert_eq!(settings.history_id_start, 6000);
        assert_eq!(settings.notes, "night shift");
    }

    #[test]
    fn missing_file_is_an_error_with_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = RunConfig::load(&dir.path().join("run.json")).expect_err("missing");
        assert!(err.to_string().contains("read run config"));
    }
}
