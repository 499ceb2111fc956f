//! Record-driven writes to arbitrary parameter paths.
//!
//! Numeric overrides write parsable numbers in canonical form and any other
//! non-blank text trimmed. Boolean overrides accept the usual spellings and
//! treat non-zero numbers as true; anything else is not written.

use ersa_model::{ParameterKind, RawValue};
use ersa_template::ParameterValue;

use crate::validate::is_missing_marker;

const TRUE_WORDS: [&str; 4] = ["true", "yes", "1", "y"];
const FALSE_WORDS: [&str; 4] = ["false", "no", "0", "n"];

/// Value to write for an override cell, or `None` when nothing should be
/// written.
pub fn override_value(raw: &RawValue, kind: ParameterKind) -> Option<ParameterValue> {
    match kind {
        ParameterKind::Numeric => numeric(raw),
        ParameterKind::Boolean => boolean(raw),
    }
}

fn numeric(raw: &RawValue) -> Option<ParameterValue> {
    match raw {
        RawValue::Empty => None,
        RawValue::Number(value) if value.is_finite() => Some(ParameterValue::Number(*value)),
        RawValue::Number(_) => None,
        RawValue::Text(text) => {
            if is_missing_marker(text) {
                return None;
            }
            let trimmed = text.trim();
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(ParameterValue::Number(value)),
                _ => Some(ParameterValue::Text(trimmed.to_string())),
            }
        }
    }
}

fn boolean(raw: &RawValue) -> Option<ParameterValue> {
    match raw {
        RawValue::Empty => None,
        RawValue::Number(value) if value.is_nan() => None,
        RawValue::Number(value) => Some(ParameterValue::Flag(*value != 0.0)),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if TRUE_WORDS.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
                Some(ParameterValue::Flag(true))
            } else if FALSE_WORDS.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
                Some(ParameterValue::Flag(false))
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|value| !value.is_nan())
                    .map(|value| ParameterValue::Flag(value != 0.0))
            }
        }
    }
}
