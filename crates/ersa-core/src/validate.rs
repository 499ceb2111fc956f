//! Measurement validation.
//!
//! One rule covers PCB length, PCB width and CBS width: the value must be a
//! finite number strictly greater than zero. Blank cells and the placeholders
//! `NA`, `N/A` and `-` (any case, surrounding whitespace ignored) count as
//! missing.

use std::fmt;

use ersa_model::{RawValue, Record};

const MISSING_MARKERS: [&str; 3] = ["NA", "N/A", "-"];

/// A validated, positive, finite measurement in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Measurement(f64);

impl Measurement {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// True for text that spells "no value".
pub(crate) fn is_missing_marker(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

pub fn validate_measurement(raw: &RawValue) -> Option<Measurement> {
    let value = match raw {
        RawValue::Empty => return None,
        RawValue::Number(value) => *value,
        RawValue::Text(text) => {
            if is_missing_marker(text) {
                return None;
            }
            text.trim().parse::<f64>().ok()?
        }
    };
    (value.is_finite() && value > 0.0).then_some(Measurement(value))
}

/// Validates `column` of `record`; an unmapped column or absent field is missing.
pub fn validate_field(record: &Record, column: Option<&str>) -> Option<Measurement> {
    column
        .and_then(|column| record.get(column))
        .and_then(validate_measurement)
}
