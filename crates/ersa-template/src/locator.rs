//! Path-addressed access to `ProgramParameter` nodes.
//!
//! Lookup is a full depth-first scan comparing the exact, case-sensitive
//! `variable` text against the requested path. The first parameter whose
//! variable matches and which has a `value` child wins. A path that matches
//! nothing is not an error; setters report it by returning `false`.

use std::fmt;

use crate::document::{Element, GeneratedDocument, TemplateDocument};

/// Element holding one addressable parameter.
pub const PARAMETER_TAG: &str = "ProgramParameter";

/// Child of [`PARAMETER_TAG`] holding the parameter path.
pub const VARIABLE_TAG: &str = "variable";

/// Child of [`PARAMETER_TAG`] holding the parameter setting.
pub const VALUE_TAG: &str = "value";

/// A value to be written into a parameter node.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Written in canonical decimal form (`100`, `75.5`).
    Number(f64),
    /// Written as exactly `True` or `False`.
    Flag(bool),
    /// Written verbatim.
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(true) => f.write_str("True"),
            Self::Flag(false) => f.write_str("False"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// A parameter as listed by [`TemplateDocument::parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
    pub path: String,
    pub value: Option<String>,
}

fn is_parameter_for(element: &Element, path: &str) -> bool {
    element.name() == PARAMETER_TAG
        && element.child(VALUE_TAG).is_some()
        && element
            .child(VARIABLE_TAG)
            .is_some_and(|variable| variable.text_equals(path))
}

fn find_value<'a>(element: &'a Element, path: &str) -> Option<&'a Element> {
    for child in element.elements() {
        if is_parameter_for(child, path) {
            return child.child(VALUE_TAG);
        }
        if let Some(found) = find_value(child, path) {
            return Some(found);
        }
    }
    None
}

fn find_value_mut<'a>(element: &'a mut Element, path: &str) -> Option<&'a mut Element> {
    for child in element.elements_mut() {
        if is_parameter_for(child, path) {
            return child.child_mut(VALUE_TAG);
        }
        if let Some(found) = find_value_mut(child, path) {
            return Some(found);
        }
    }
    None
}

fn collect_parameters(element: &Element, out: &mut Vec<ParameterEntry>) {
    for child in element.elements() {
        if child.name() == PARAMETER_TAG {
            if let Some(variable) = child.child(VARIABLE_TAG) {
                out.push(ParameterEntry {
                    path: variable.text(),
                    value: child.child(VALUE_TAG).map(Element::text),
                });
            }
        }
        collect_parameters(child, out);
    }
}

impl TemplateDocument {
    /// Current value text at `path`, if the path exists.
    pub fn parameter_value(&self, path: &str) -> Option<String> {
        find_value(self.root(), path).map(Element::text)
    }

    pub fn has_parameter(&self, path: &str) -> bool {
        find_value(self.root(), path).is_some()
    }

    /// Every parameter node in document order.
    pub fn parameters(&self) -> Vec<ParameterEntry> {
        let mut out = Vec::new();
        collect_parameters(self.root(), &mut out);
        out
    }
}

impl GeneratedDocument {
    pub fn parameter_value(&self, path: &str) -> Option<String> {
        find_value(self.root(), path).map(Element::text)
    }

    /// Mutable access to the `value` element at `path`.
    pub fn locate(&mut self, path: &str) -> Option<&mut Element> {
        find_value_mut(self.root_mut(), path)
    }

    /// Writes `value` at `path`. Returns `false` when the path does not exist.
    pub fn set_parameter(&mut self, path: &str, value: &ParameterValue) -> bool {
        match self.locate(path) {
            Some(slot) => {
                slot.set_text(value.to_string());
                true
            }
            None => {
                tracing::debug!(path, "parameter path not found in template");
                false
            }
        }
    }
}
