//! Shared data model for the ERSA program generator.
//!
//! Every crate in the workspace talks in these types: tabular input
//! ([`RecordSet`]), the column mapping chosen by the user ([`ColumnMapping`]),
//! per-run metadata settings ([`MetadataSettings`]) and the run result
//! ([`GenerationOutcome`]).

pub mod mapping;
pub mod metadata;
pub mod outcome;
pub mod paths;
pub mod record;
pub mod redact;

pub use mapping::{ColumnMapping, LogicalParameter, ParameterKind, ParameterOverride, UNMAPPED};
pub use metadata::{DerivedMetadata, MetadataSettings, TIMESTAMP_FORMAT};
pub use outcome::{GeneratedFile, GenerationOutcome, RecordError, SKIP_REASON_DIMENSIONS, SkipRecord};
pub use record::{RawValue, Record, RecordSet};
