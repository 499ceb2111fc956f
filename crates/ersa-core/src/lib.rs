//! Program generation core.
//!
//! One pass over the input records produces one program document per
//! accepted record:
//!
//! 1. [`validate`] checks the PCB length and width of each record.
//! 2. [`sequence`] derives program/history ids and timestamps.
//! 3. [`activation`] decides between CBS support and park position.
//! 4. [`generator`] clones the template, writes the values, and hands the
//!    document to an [`OutputSink`].
//!
//! Steps 1-3 are pure functions of one record and the run settings, so
//! records can be built in parallel (see [`GenerationOptions::jobs`]).

pub mod activation;
pub mod clock;
pub mod error;
pub mod generator;
pub mod naming;
pub mod overrides;
pub mod sequence;
pub mod sink;
pub mod validate;

pub use activation::{Activation, resolve_activation};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{GenerateError, SequenceError, SinkError};
pub use generator::{GenerationOptions, Generator, generate_to_directory};
pub use naming::{output_file_name, program_name, sanitize_file_stem};
pub use overrides::override_value;
pub use sequence::derive_metadata;
pub use sink::{DirectorySink, MemorySink, NullSink, OutputSink};
pub use validate::{Measurement, validate_field, validate_measurement};
