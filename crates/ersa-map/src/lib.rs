//! Column mapping: which spreadsheet column feeds which logical parameter.
//!
//! Mappings are persisted as a flat JSON object (see [`MappingStore`]) and can
//! be guessed from header names with [`auto_detect`].

mod detect;
mod error;
mod store;

pub use detect::{auto_detect, keywords, merge};
pub use error::{MapError, Result};
pub use store::{DEFAULT_MAPPING_FILE, MappingStore};
