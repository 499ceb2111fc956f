//! ERSA program templates.
//!
//! A template is the XML export of a soldering program. Its tunable settings
//! live in `ProgramParameter` nodes, each addressed by the pipe-delimited
//! path stored in its `variable` child and holding its setting in a `value`
//! child. Program identity and revision metadata live in the
//! `SolderingPrograms` and `ProgramHistory` sections directly below the root.
//!
//! [`TemplateDocument`] is read-only. Each generated program starts from
//! [`TemplateDocument::instantiate`], a deep copy that can be edited and
//! serialized without touching the template or any other copy.

mod discovery;
mod document;
mod error;
mod locator;
mod metadata;

pub use discovery::{TEMPLATE_NAMES, discover_template};
pub use document::{Element, GeneratedDocument, Node, TemplateDocument};
pub use error::{Result, TemplateError};
pub use locator::{PARAMETER_TAG, ParameterEntry, ParameterValue, VALUE_TAG, VARIABLE_TAG};
pub use metadata::{HISTORY_SECTION, IDENTITY_SECTION};

/// File extension of generated program documents.
pub const DOCUMENT_EXTENSION: &str = "xml";
