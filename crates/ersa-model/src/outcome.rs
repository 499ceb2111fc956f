use serde::{Deserialize, Serialize};

/// Reason recorded when a record lacks a usable length or width.
pub const SKIP_REASON_DIMENSIONS: &str =
    "Missing/invalid PCB Length or PCB Width (blank/0/NA/invalid) — both required";

/// A record excluded by validation before any document was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub program_name: String,
    pub reason: String,
}

/// A record that failed while its document was being built or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    /// 1-based position in the input.
    pub position: usize,
    pub program_name: String,
    pub reason: String,
}

/// A document written for an accepted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// 1-based position in the input.
    pub position: usize,
    pub program_name: String,
    pub file_name: String,
    pub program_id: i64,
    pub parameters_written: usize,
}

/// Result of one generation run. All lists are in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub success_count: usize,
    pub total_count: usize,
    pub skipped: Vec<SkipRecord>,
    pub errors: Vec<RecordError>,
    pub generated: Vec<GeneratedFile>,
}

impl GenerationOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Every input record landed in exactly one outcome class.
    pub fn is_fully_accounted(&self) -> bool {
        self.success_count + self.skipped.len() + self.errors.len() == self.total_count
    }
}
