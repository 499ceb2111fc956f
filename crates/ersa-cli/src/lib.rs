//! CLI library components for the ERSA program generator.

pub mod config;
pub mod logging;
pub mod pipeline;
