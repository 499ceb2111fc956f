//! CBS support versus park position.
//!
//! The CBS mid-board support and the park position of the middle axis are
//! mutually exclusive. A record with a valid CBS width activates CBS; anything
//! else (missing, blank, `NA`, zero, negative, unparsable) parks the axis.

use ersa_model::RawValue;

use crate::validate::{Measurement, is_missing_marker, validate_measurement};

/// Equipment mode for one program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// No CBS support; park position active.
    Park,
    /// CBS support active at the given width.
    Cbs { width: Measurement },
}

impl Activation {
    pub fn park_active(self) -> bool {
        matches!(self, Self::Park)
    }

    pub fn cbs_active(self) -> bool {
        matches!(self, Self::Cbs { .. })
    }

    pub fn cbs_width(self) -> Option<Measurement> {
        match self {
            Self::Park => None,
            Self::Cbs { width } => Some(width),
        }
    }
}

/// Decides the mode from the raw CBS cell; `None` means the field is absent.
pub fn resolve_activation(raw: Option<&RawValue>) -> Activation {
    let Some(raw) = raw else {
        return Activation::Park;
    };
    if let RawValue::Text(text) = raw {
        if is_missing_marker(text) {
            return Activation::Park;
        }
    }
    match validate_measurement(raw) {
        Some(width) => Activation::Cbs { width },
        None => Activation::Park,
    }
}
