//! Error types for template loading and document serialization.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid UTF-8 in template near byte {position}")]
    Encoding { position: u64 },

    #[error("unsupported entity reference '&{0};'")]
    UnknownEntity(String),

    #[error("invalid template structure: {0}")]
    Structure(String),

    #[error("failed to write document: {0}")]
    Write(String),

    #[error("metadata section(s) not found: {}", .0.join(", "))]
    MissingSections(Vec<String>),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
