//! Run orchestration.
//!
//! A run has two phases. Planning walks the records in input order, resolves
//! program names, validates dimensions and claims output file names; it is
//! cheap and sequential so skip and collision decisions are deterministic.
//! Building clones the template per accepted record, writes metadata and
//! parameters, and hands the document to the sink. Building may run on a
//! rayon pool; results are collected in input order either way.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, debug_span, error, info, info_span, trace, warn};

use ersa_model::{
    ColumnMapping, GeneratedFile, GenerationOutcome, LogicalParameter, MetadataSettings,
    ParameterKind, ParameterOverride, Record, RecordError, RecordSet, SKIP_REASON_DIMENSIONS,
    SkipRecord, paths, redact::redact_value,
};
use ersa_template::{GeneratedDocument, ParameterValue, TemplateDocument};

use crate::activation::resolve_activation;
use crate::clock::{Clock, SystemClock};
use crate::error::GenerateError;
use crate::naming::{output_file_name, program_name};
use crate::overrides::override_value;
use crate::sequence::derive_metadata;
use crate::sink::{DirectorySink, OutputSink};
use crate::validate::{Measurement, validate_field};

static SYSTEM_CLOCK: SystemClock = SystemClock;

/// Execution options for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Worker threads. `1` builds on the calling thread; `0` uses the rayon
    /// default.
    pub jobs: usize,
    /// Treat output names that differ only in letter case as the same file.
    /// Defaults to the usual filesystem behaviour of the host platform.
    pub case_insensitive_names: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            case_insensitive_names: cfg!(any(windows, target_os = "macos")),
        }
    }
}

/// Columns resolved against the record set once per run.
#[derive(Debug, Clone, Copy)]
struct Columns<'a> {
    stencil: Option<&'a str>,
    length: Option<&'a str>,
    width: Option<&'a str>,
    cbs: Option<&'a str>,
}

struct BuildJob<'r> {
    index: usize,
    record: &'r Record,
    program_name: String,
    file_name: String,
    length: Measurement,
    width: Measurement,
}

enum Plan<'r> {
    Skip(SkipRecord),
    Reject(RecordError),
    Build(BuildJob<'r>),
}

enum RecordResult {
    Skipped(SkipRecord),
    Failed(RecordError),
    Generated(GeneratedFile),
}

/// Generates one program document per accepted record.
pub struct Generator<'a> {
    template: &'a TemplateDocument,
    mapping: &'a ColumnMapping,
    settings: &'a MetadataSettings,
    overrides: &'a [ParameterOverride],
    options: GenerationOptions,
    clock: &'a dyn Clock,
}

impl<'a> Generator<'a> {
    pub fn new(
        template: &'a TemplateDocument,
        mapping: &'a ColumnMapping,
        settings: &'a MetadataSettings,
    ) -> Self {
        Self {
            template,
            mapping,
            settings,
            overrides: &[],
            options: GenerationOptions::default(),
            clock: &SYSTEM_CLOCK,
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: &'a [ParameterOverride]) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Processes every record in `records`.
    ///
    /// Every record ends up in exactly one of `generated`, `skipped` or
    /// `errors`. Only a failure to start the worker pool is returned as an
    /// error.
    pub fn run(
        &self,
        records: &RecordSet,
        sink: &dyn OutputSink,
    ) -> Result<GenerationOutcome, GenerateError> {
        let span = info_span!("generate", records = records.len(), jobs = self.options.jobs);
        let _guard = span.enter();
        let started = Instant::now();

        let columns = Columns {
            stencil: self.mapping.resolve(LogicalParameter::Stencil, records),
            length: self.mapping.resolve(LogicalParameter::PcbLength, records),
            width: self.mapping.resolve(LogicalParameter::PcbWidth, records),
            cbs: self.mapping.resolve(LogicalParameter::CbsWidth, records),
        };
        self.report_unresolved(records, columns);
        let overrides = self.active_overrides(records);

        let plans = plan(records, columns, self.options.case_insensitive_names);
        let total = records.len();
        let build = |plan: Plan<'_>| match plan {
            Plan::Skip(skip) => RecordResult::Skipped(skip),
            Plan::Reject(failure) => RecordResult::Failed(failure),
            Plan::Build(job) => self.build(job, columns, &overrides, total, sink),
        };

        let results: Vec<RecordResult> = if self.options.jobs == 1 {
            plans.into_iter().map(build).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()?;
            pool.install(|| plans.into_par_iter().map(build).collect())
        };

        let mut outcome = GenerationOutcome {
            total_count: total,
            ..GenerationOutcome::default()
        };
        for result in results {
            match result {
                RecordResult::Skipped(skip) => outcome.skipped.push(skip),
                RecordResult::Failed(failure) => outcome.errors.push(failure),
                RecordResult::Generated(file) => {
                    outcome.success_count += 1;
                    outcome.generated.push(file);
                }
            }
        }

        info!(
            generated = outcome.success_count,
            skipped = outcome.skipped_count(),
            errors = outcome.error_count(),
            total = outcome.total_count,
            duration_ms = started.elapsed().as_millis(),
            "generation complete"
        );
        Ok(outcome)
    }

    fn report_unresolved(&self, records: &RecordSet, columns: Columns<'_>) {
        for (param, resolved) in [
            (LogicalParameter::Stencil, columns.stencil),
            (LogicalParameter::PcbLength, columns.length),
            (LogicalParameter::PcbWidth, columns.width),
            (LogicalParameter::CbsWidth, columns.cbs),
        ] {
            if resolved.is_some() {
                continue;
            }
            match self.mapping.column(param) {
                Some(column) => warn!(
                    parameter = param.key(),
                    column,
                    "mapped column not present in data, treating as unmapped"
                ),
                None => debug!(parameter = param.key(), "parameter not mapped"),
            }
        }
        if records.is_empty() {
            return;
        }

        let mut fixed = vec![paths::PCB_LENGTH, paths::CONVEYOR_WIDTH];
        if columns.cbs.is_some() {
            fixed.extend([paths::CBS_WIDTH, paths::CBS_ACTIVE, paths::PARK_ACTIVE]);
        }
        for path in fixed {
            if !self.template.has_parameter(path) {
                warn!(path, "template has no parameter at this path, value will not be written");
            }
        }
    }

    fn active_overrides(&self, records: &RecordSet) -> Vec<&'a ParameterOverride> {
        self.overrides
            .iter()
            .filter(|entry| {
                let present = records.has_column(&entry.column);
                if !present {
                    warn!(column = %entry.column, path = %entry.path, "override column not present in data");
                } else if !self.template.has_parameter(&entry.path) {
                    warn!(column = %entry.column, path = %entry.path, "override path not found in template");
                }
                present
            })
            .collect()
    }

    fn build(
        &self,
        job: BuildJob<'_>,
        columns: Columns<'_>,
        overrides: &[&ParameterOverride],
        total: usize,
        sink: &dyn OutputSink,
    ) -> RecordResult {
        let position = job.index + 1;
        let span = debug_span!("record", index = position, program = %job.program_name);
        let _guard = span.enter();

        match self.build_document(&job, columns, overrides, total) {
            Ok((doc, parameters_written, program_id)) => match sink.write(&job.file_name, &doc) {
                Ok(path) => {
                    debug!(path = %path.display(), parameters_written, "program written");
                    RecordResult::Generated(GeneratedFile {
                        position,
                        program_name: job.program_name,
                        file_name: job.file_name,
                        program_id,
                        parameters_written,
                    })
                }
                Err(err) => fail(job, err.to_string()),
            },
            Err(reason) => fail(job, reason),
        }
    }

    fn build_document(
        &self,
        job: &BuildJob<'_>,
        columns: Columns<'_>,
        overrides: &[&ParameterOverride],
        total: usize,
    ) -> Result<(GeneratedDocument, usize, i64), String> {
        let metadata = derive_metadata(self.settings, job.index, total, self.clock.now())
            .map_err(|err| err.to_string())?;
        let mut doc = self.template.instantiate();

        match doc.stamp_metadata(&job.program_name, &metadata) {
            Ok(fields) => debug!(fields, program_id = metadata.program_id, "metadata stamped"),
            Err(err) => warn!(error = %err, "metadata write failed"),
        }

        let mut written = 0;
        let mut set = |doc: &mut GeneratedDocument, path: &str, value: ParameterValue| {
            if doc.set_parameter(path, &value) {
                debug!(path, value = redact_value(&value.to_string()), "parameter written");
                written += 1;
            }
        };

        set(&mut doc, paths::PCB_LENGTH, job.length.value().into());
        set(&mut doc, paths::CONVEYOR_WIDTH, job.width.value().into());

        if let Some(column) = columns.cbs {
            let activation = resolve_activation(job.record.get(column));
            if let Some(width) = activation.cbs_width() {
                set(&mut doc, paths::CBS_WIDTH, width.value().into());
            }
            set(&mut doc, paths::CBS_ACTIVE, activation.cbs_active().into());
            set(&mut doc, paths::PARK_ACTIVE, activation.park_active().into());
        }

        for entry in overrides {
            let Some(raw) = job.record.get(&entry.column) else {
                continue;
            };
            trace!(column = %entry.column, raw = redact_value(&raw.to_string()), "override cell");
            match override_value(raw, entry.kind) {
                Some(value) => set(&mut doc, &entry.path, value),
                None if entry.kind == ParameterKind::Boolean && !raw.is_blank() => {
                    warn!(column = %entry.column, path = %entry.path, "override value is not a boolean, not written");
                }
                None => {}
            }
        }

        Ok((doc, written, metadata.program_id))
    }
}

fn fail(job: BuildJob<'_>, reason: String) -> RecordResult {
    error!(record_index = job.index + 1, program_name = %job.program_name, %reason, "record failed");
    RecordResult::Failed(RecordError {
        position: job.index + 1,
        program_name: job.program_name,
        reason,
    })
}

fn plan<'r>(records: &'r RecordSet, columns: Columns<'_>, fold_case: bool) -> Vec<Plan<'r>> {
    let mut claimed: HashMap<String, usize> = HashMap::new();
    records
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let position = index + 1;
            let name = program_name(record, columns.stencil, position);
            let length = validate_field(record, columns.length);
            let width = validate_field(record, columns.width);
            let (Some(length), Some(width)) = (length, width) else {
                warn!(record_index = position, program_name = %name, reason = SKIP_REASON_DIMENSIONS, "record skipped");
                return Plan::Skip(SkipRecord {
                    program_name: name,
                    reason: SKIP_REASON_DIMENSIONS.to_string(),
                });
            };

            let file_name = output_file_name(&name);
            let claim = if fold_case {
                file_name.to_lowercase()
            } else {
                file_name.clone()
            };
            if let Some(first) = claimed.get(&claim) {
                let reason = format!("output file '{file_name}' already produced by record {first}");
                warn!(record_index = position, program_name = %name, %reason, "duplicate output name");
                return Plan::Reject(RecordError {
                    position,
                    program_name: name,
                    reason,
                });
            }
            claimed.insert(claim, position);

            Plan::Build(BuildJob {
                index,
                record,
                program_name: name,
                file_name,
                length,
                width,
            })
        })
        .collect()
}

/// Loads the template at `template_path`, creates `output_dir` and runs a
/// sequential generation with default options into it.
pub fn generate_to_directory(
    template_path: &Path,
    records: &RecordSet,
    mapping: &ColumnMapping,
    settings: &MetadataSettings,
    output_dir: &Path,
) -> Result<GenerationOutcome, GenerateError> {
    let template = TemplateDocument::load(template_path)?;
    let sink = DirectorySink::create(output_dir)?;
    Generator::new(&template, mapping, settings).run(records, &sink)
}
