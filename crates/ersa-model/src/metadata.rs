use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `creationdate` / `changedate` values (local time, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Per-run metadata configuration.
///
/// Program and history ids increment with the record position; every other
/// field is stamped unchanged into each generated program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub program_id_start: i64,
    pub history_id_start: i64,
    pub library_id: i64,
    pub set_number: i64,
    pub version: i64,
    pub user_id: i64,
    pub notes: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            program_id_start: 10000,
            history_id_start: 6000,
            library_id: 100,
            set_number: 1,
            version: 1,
            user_id: 881,
            notes: "Auto-generated by ERSA tool".to_string(),
        }
    }
}

/// Metadata stamped into one generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMetadata {
    pub program_id: i64,
    pub history_id: i64,
    pub library_id: i64,
    pub set_number: i64,
    pub version: i64,
    pub user_id: i64,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub changed_at: NaiveDateTime,
}

impl DerivedMetadata {
    pub fn creation_date(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn change_date(&self) -> String {
        self.changed_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn partial_settings_use_defaults() {
        let settings: MetadataSettings =
            serde_json::from_str(r#"{"program_id_start": 500}"#).unwrap();
        assert_eq!(settings.program_id_start, 500);
        assert_eq!(settings.history_id_start, 6000);
        assert_eq!(settings.user_id, 881);
    }

    #[test]
    fn dates_use_microsecond_iso_form() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(7, 5, 1, 42)
            .unwrap();
        let derived = DerivedMetadata {
            program_id: 1,
            history_id: 1,
            library_id: 1,
            set_number: 1,
            version: 1,
            user_id: 1,
            notes: String::new(),
            created_at: at,
            changed_at: at,
        };
        assert_eq!(derived.creation_date(), "2024-03-09T07:05:01.000042");
        assert_eq!(derived.creation_date(), derived.change_date());
    }
}
