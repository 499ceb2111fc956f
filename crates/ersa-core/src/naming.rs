//! Program and output file names.

use ersa_model::{RawValue, Record};
use ersa_template::DOCUMENT_EXTENSION;

const FORBIDDEN: [char; 10] = ['/', '\\', ' ', ':', '*', '?', '"', '<', '>', '|'];

/// Program name for the record at 1-based `position`.
///
/// Uses the trimmed stencil value; falls back to `Program_{position}` when the
/// stencil column is unmapped or the value is blank.
pub fn program_name(record: &Record, stencil_column: Option<&str>, position: usize) -> String {
    stencil_column
        .and_then(|column| record.get(column))
        .filter(|value| !value.is_blank())
        .map(|value| match value {
            RawValue::Text(text) => text.trim().to_string(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| format!("Program_{position}"))
}

/// Replaces path separators, whitespace, reserved punctuation and control
/// characters with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if FORBIDDEN.contains(&ch) || ch.is_control() || ch.is_whitespace() {
                '_'
            } else {
                ch
            }
        })
        .collect()
}

pub fn output_file_name(program_name: &str) -> String {
    format!("{}.{DOCUMENT_EXTENSION}", sanitize_file_stem(program_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_trimmed_stencil_value() {
        let record = Record::from_pairs([("Stencil", "  ABC-123 ")]);
        assert_eq!(program_name(&record, Some("Stencil"), 1), "ABC-123");
    }

    #[test]
    fn numeric_stencil_uses_canonical_form() {
        let mut record = Record::new();
        record.push("Stencil", RawValue::Number(4711.0));
        assert_eq!(program_name(&record, Some("Stencil"), 1), "4711");
    }

    #[test]
    fn falls_back_to_position() {
        let record = Record::from_pairs([("Stencil", "   ")]);
        assert_eq!(program_name(&record, Some("Stencil"), 3), "Program_3");
        assert_eq!(program_name(&record, None, 4), "Program_4");
        assert_eq!(program_name(&record, Some("Other"), 5), "Program_5");
    }

    #[test]
    fn file_names_are_filesystem_safe() {
        assert_eq!(output_file_name("A/B 1"), "A_B_1.xml");
        assert_eq!(output_file_name(r#"x\y:z*?"<>|"#), "x_y_z______.xml");
        assert_eq!(output_file_name("tab\there"), "tab_here.xml");
        assert_eq!(output_file_name("Board-7.2"), "Board-7.2.xml");
    }
}
