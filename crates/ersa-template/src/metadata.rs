//! Program identity and revision history sections.

use ersa_model::DerivedMetadata;

use crate::document::{Element, GeneratedDocument};
use crate::error::{Result, TemplateError};

/// Root child holding the program identity fields.
pub const IDENTITY_SECTION: &str = "SolderingPrograms";

/// Root child holding the revision history fields.
pub const HISTORY_SECTION: &str = "ProgramHistory";

fn write_fields(section: &mut Element, fields: &[(&str, &str)]) -> usize {
    let mut written = 0;
    for (name, value) in fields {
        if let Some(field) = section.child_mut(name) {
            field.set_text(*value);
            written += 1;
        }
    }
    written
}

impl GeneratedDocument {
    /// Stamps identity and history metadata for one program.
    ///
    /// Only fields already present in a section are written. Present sections
    /// are always updated; a missing section is reported as
    /// [`TemplateError::MissingSections`] after the other section was written.
    pub fn stamp_metadata(&mut self, program_name: &str, metadata: &DerivedMetadata) -> Result<usize> {
        let program_id = metadata.program_id.to_string();
        let library_id = metadata.library_id.to_string();
        let version = metadata.version.to_string();
        let user_id = metadata.user_id.to_string();
        let history_id = metadata.history_id.to_string();
        let set_number = metadata.set_number.to_string();
        let creation_date = metadata.creation_date();
        let change_date = metadata.change_date();

        let mut missing = Vec::new();
        let mut written = 0;
        let root = self.root_mut();

        match root.child_mut(IDENTITY_SECTION) {
            Some(section) => {
                written += write_fields(
                    section,
                    &[
                        ("programid", program_id.as_str()),
                        ("libraryid", library_id.as_str()),
                        ("version", version.as_str()),
                        ("creationuser", user_id.as_str()),
                        ("changeuser", user_id.as_str()),
                        ("creationdate", creation_date.as_str()),
                        ("changedate", change_date.as_str()),
                        ("notes", metadata.notes.as_str()),
                        ("name", program_name),
                    ],
                );
            }
            None => missing.push(IDENTITY_SECTION.to_string()),
        }

        match root.child_mut(HISTORY_SECTION) {
            Some(section) => {
                written += write_fields(
                    section,
                    &[
                        ("historyid", history_id.as_str()),
                        ("setnumber", set_number.as_str()),
                        ("creationuser", user_id.as_str()),
                        ("changeuser", user_id.as_str()),
                        ("creationdate", creation_date.as_str()),
                        ("changedate", change_date.as_str()),
                    ],
                );
            }
            None => missing.push(HISTORY_SECTION.to_string()),
        }

        if missing.is_empty() {
            Ok(written)
        } else {
            Err(TemplateError::MissingSections(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ersa_model::DerivedMetadata;

    use crate::TemplateDocument;

    use super::*;

    fn metadata() -> DerivedMetadata {
        let at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 6)
            .unwrap();
        DerivedMetadata {
            program_id: 10002,
            history_id: 6002,
            library_id: 100,
            set_number: 1,
            version: 3,
            user_id: 881,
            notes: "note".to_string(),
            created_at: at,
            changed_at: at,
        }
    }

    #[test]
    fn stamps_both_sections() {
        let template = TemplateDocument::parse(
            "<Export>\
               <SolderingPrograms><programid>1</programid><name>old</name><notes/><creationdate/><changedate/></SolderingPrograms>\
               <ProgramHistory><historyid>1</historyid><creationuser>0</creationuser><changedate/></ProgramHistory>\
             </Export>",
        )
        .unwrap();
        let mut doc = template.instantiate();
        let written = doc.stamp_metadata("BOARD_A", &metadata()).unwrap();
        assert_eq!(written, 8);

        let identity = doc.root().child(IDENTITY_SECTION).unwrap();
        assert_eq!(identity.child("programid").unwrap().text(), "10002");
        assert_eq!(identity.child("name").unwrap().text(), "BOARD_A");
        assert_eq!(identity.child("notes").unwrap().text(), "note");
        assert_eq!(
            identity.child("creationdate").unwrap().text(),
            "2025-01-02T03:04:05.000006"
        );
        assert!(identity.child("libraryid").is_none());

        let history = doc.root().child(HISTORY_SECTION).unwrap();
        assert_eq!(history.child("historyid").unwrap().text(), "6002");
        assert_eq!(history.child("creationuser").unwrap().text(), "881");
        assert_eq!(
            history.child("changedate").unwrap().text(),
            identity.child("changedate").unwrap().text()
        );
    }

    #[test]
    fn missing_section_is_reported_after_writing_the_other() {
        let template = TemplateDocument::parse(
            "<Export><SolderingPrograms><programid>1</programid></SolderingPrograms></Export>",
        )
        .unwrap();
        let mut doc = template.instantiate();
        let error = doc.stamp_metadata("B", &metadata()).unwrap_err();
        assert!(matches!(&error, TemplateError::MissingSections(names) if names == &["ProgramHistory".to_string()]));
        assert_eq!(
            doc.root()
                .child(IDENTITY_SECTION)
                .unwrap()
                .child("programid")
                .unwrap()
                .text(),
            "10002"
        );
    }
}
