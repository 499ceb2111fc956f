//! Per-record metadata derivation.
//!
//! Identifiers are positional: the record at zero-based index `i` receives
//! `program_id_start + i` and `history_id_start + i` whether or not earlier
//! records were skipped.

use chrono::NaiveDateTime;

use ersa_model::{DerivedMetadata, MetadataSettings};

use crate::error::SequenceError;

pub fn derive_metadata(
    settings: &MetadataSettings,
    index: usize,
    record_count: usize,
    captured_at: NaiveDateTime,
) -> Result<DerivedMetadata, SequenceError> {
    if index >= record_count {
        return Err(SequenceError::IndexOutOfRange {
            index,
            count: record_count,
        });
    }
    Ok(DerivedMetadata {
        program_id: offset("program id", settings.program_id_start, index)?,
        history_id: offset("history id", settings.history_id_start, index)?,
        library_id: settings.library_id,
        set_number: settings.set_number,
        version: settings.version,
        user_id: settings.user_id,
        notes: settings.notes.clone(),
        created_at: captured_at,
        changed_at: captured_at,
    })
}

fn offset(field: &'static str, start: i64, index: usize) -> Result<i64, SequenceError> {
    i64::try_from(index)
        .ok()
        .and_then(|step| start.checked_add(step))
        .ok_or(SequenceError::Overflow { field, start, index })
}
