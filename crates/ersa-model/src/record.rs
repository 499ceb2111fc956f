use std::fmt;

/// A single raw cell value as delivered by the tabular loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Numeric cell (spreadsheet float or integer).
    Number(f64),
    /// Textual cell, untrimmed.
    Text(String),
}

impl RawValue {
    /// Builds a value from text, mapping blank input to [`RawValue::Empty`].
    pub fn from_text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// True for `Empty`, blank text and NaN numbers.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(value) => value.is_nan(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One input row: field name to raw value, in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, RawValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, field: impl Into<String>, value: RawValue) {
        self.fields.push((field.into(), value));
    }

    /// Returns the value of the first field with this exact name.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Column-enumerated tabular input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_empty() {
        assert_eq!(RawValue::from_text("   "), RawValue::Empty);
        assert_eq!(RawValue::from("75"), RawValue::Text("75".to_string()));
    }

    #[test]
    fn nan_counts_as_blank() {
        assert!(RawValue::Number(f64::NAN).is_blank());
        assert!(!RawValue::Number(0.0).is_blank());
    }

    #[test]
    fn record_lookup_is_exact() {
        let record = Record::from_pairs([("Length", "100"), ("length", "5")]);
        assert_eq!(record.get("Length"), Some(&RawValue::Text("100".to_string())));
        assert_eq!(record.get("LENGTH"), None);
    }
}
