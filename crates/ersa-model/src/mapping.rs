//! Column mapping between spreadsheet columns and program parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::RecordSet;

/// Sentinel stored for a logical parameter with no source column.
pub const UNMAPPED: &str = "(None)";

/// Logical parameters the generator reads from each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalParameter {
    /// Program / board name, used for the output file name.
    Stencil,
    /// PCB length in millimetres.
    PcbLength,
    /// PCB width, also the conveyor width.
    PcbWidth,
    /// Width of the CBS mid-board support.
    CbsWidth,
}

impl LogicalParameter {
    pub const ALL: [Self; 4] = [Self::Stencil, Self::PcbLength, Self::PcbWidth, Self::CbsWidth];

    /// Key used in the persisted mapping file.
    pub fn key(self) -> &'static str {
        match self {
            Self::Stencil => "STENCIL",
            Self::PcbLength => "PCB_Length",
            Self::PcbWidth => "PCB_Width",
            Self::CbsWidth => "CBS_Width",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stencil => "PCB Name (STENCIL)",
            Self::PcbLength => "PCB Length (mm)",
            Self::PcbWidth => "PCB Width / Conveyor Width (mm)",
            Self::CbsWidth => "CBS Width / Middle Support (mm)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }
}

/// Logical parameter key to selected source column.
///
/// Serialized as a flat JSON object. Keys other than the four
/// [`LogicalParameter`] keys are kept as-is so mapping files written by
/// other tools survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ColumnMapping::set`].
    #[must_use]
    pub fn with(mut self, param: LogicalParameter, column: impl Into<String>) -> Self {
        self.set(param, column);
        self
    }

    pub fn set(&mut self, param: LogicalParameter, column: impl Into<String>) {
        self.columns.insert(param.key().to_string(), column.into());
    }

    pub fn set_key(&mut self, key: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(key.into(), column.into());
    }

    pub fn unset(&mut self, param: LogicalParameter) {
        self.columns
            .insert(param.key().to_string(), UNMAPPED.to_string());
    }

    /// Selected column for a parameter, `None` when absent or unmapped.
    pub fn column(&self, param: LogicalParameter) -> Option<&str> {
        self.column_for_key(param.key())
    }

    pub fn column_for_key(&self, key: &str) -> Option<&str> {
        self.columns
            .get(key)
            .map(String::as_str)
            .filter(|column| !column.trim().is_empty() && *column != UNMAPPED)
    }

    /// Selected column for a parameter, only if the record set has it.
    pub fn resolve<'a>(&'a self, param: LogicalParameter, records: &RecordSet) -> Option<&'a str> {
        self.column(param)
            .filter(|column| records.has_column(column))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(key, column)| (key.as_str(), column.as_str()))
    }

    pub fn is_mapped(&self, param: LogicalParameter) -> bool {
        self.column(param).is_some()
    }
}

/// How a value is rendered when written into a parameter node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Canonical decimal string.
    #[default]
    Numeric,
    /// Exactly `True` or `False`.
    Boolean,
}

/// Extra column written verbatim into an arbitrary parameter path.
///
/// Used for zone temperatures, tolerances and convection settings, which the
/// generator copies without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOverride {
    pub column: String,
    pub path: String,
    #[serde(default)]
    pub kind: ParameterKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn sentinel_and_blank_are_unmapped() {
        let mut mapping = ColumnMapping::new().with(LogicalParameter::Stencil, "Board");
        mapping.unset(LogicalParameter::PcbLength);
        mapping.set(LogicalParameter::PcbWidth, "  ");

        assert_eq!(mapping.column(LogicalParameter::Stencil), Some("Board"));
        assert_eq!(mapping.column(LogicalParameter::PcbLength), None);
        assert_eq!(mapping.column(LogicalParameter::PcbWidth), None);
        assert_eq!(mapping.column(LogicalParameter::CbsWidth), None);
    }

    #[test]
    fn resolve_requires_column_in_records() {
        let mapping = ColumnMapping::new()
            .with(LogicalParameter::PcbLength, "Length")
            .with(LogicalParameter::PcbWidth, "Breite");
        let records = RecordSet::new(
            vec!["Length".to_string()],
            vec![Record::from_pairs([("Length", "10")])],
        );
        assert_eq!(
            mapping.resolve(LogicalParameter::PcbLength, &records),
            Some("Length")
        );
        assert_eq!(mapping.resolve(LogicalParameter::PcbWidth, &records), None);
    }

    #[test]
    fn keys_round_trip() {
        for param in LogicalParameter::ALL {
            assert_eq!(LogicalParameter::from_key(param.key()), Some(param));
        }
        assert_eq!(LogicalParameter::from_key("Heating_Top_Temp"), None);
    }
}
