use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use ersa_cli::config::RunConfig;
use ersa_cli::pipeline::{resolve_mapping, resolve_template};
use ersa_core::{DirectorySink, GenerationOptions, Generator, NullSink, OutputSink};
use ersa_ingest::{list_columns, read_records};
use ersa_map::{MappingStore, auto_detect};
use ersa_model::RecordSet;
use ersa_model::redact::{log_data_enabled, redact_value};
use ersa_report::{write_skip_report, write_summary_json};
use ersa_template::TemplateDocument;

use crate::cli::{DataArgs, DetectMappingArgs, GenerateArgs, NameCaseArg};
use crate::types::{ColumnsResult, GenerateResult};

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let data = &args.input.data;
    let span = info_span!("run", data = %data.display());
    let _guard = span.enter();
    let started = Instant::now();

    let records = read_records(data).with_context(|| format!("load {}", data.display()))?;
    trace_sample(&records);

    let store = MappingStore::new(&args.mapping);
    let resolved = resolve_mapping(&store, &records.columns)?;
    if args.save_mapping {
        store
            .save(&resolved.mapping)
            .with_context(|| format!("save mapping {}", args.mapping.display()))?;
    }

    let mut config = RunConfig::load_or_default(args.config.as_deref())?;
    args.metadata.apply_to(&mut config.metadata);

    let template_path = resolve_template(args.template.as_deref(), &args.template_dir)?;
    let template = TemplateDocument::load(&template_path)
        .with_context(|| format!("load template {}", template_path.display()))?;

    let directory_sink;
    let sink: &dyn OutputSink = if args.dry_run {
        &NullSink
    } else {
        directory_sink = DirectorySink::create(&args.output_dir)
            .with_context(|| format!("prepare output directory {}", args.output_dir.display()))?;
        &directory_sink
    };

    let outcome = Generator::new(&template, &resolved.mapping, &config.metadata)
        .with_overrides(&config.overrides)
        .with_options(generation_options(args))
        .run(&records, sink)
        .context("generate programs")?;

    let skip_report = match &args.skip_report {
        Some(path) if !outcome.skipped.is_empty() => {
            write_skip_report(path, &outcome.skipped)
                .with_context(|| format!("write skip report {}", path.display()))?;
            Some(path.clone())
        }
        _ => None,
    };
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &outcome)
            .with_context(|| format!("write summary {}", path.display()))?;
    }

    info!(
        duration_ms = started.elapsed().as_millis(),
        generated = outcome.success_count,
        "run finished"
    );
    Ok(GenerateResult {
        output_dir: args.output_dir.clone(),
        template: template_path,
        mapping_source: resolved.source,
        has_errors: outcome.has_errors(),
        outcome,
        skip_report,
        summary_json: args.summary_json.clone(),
        dry_run: args.dry_run,
    })
}

pub fn run_columns(args: &DataArgs) -> Result<ColumnsResult> {
    let columns = list_columns(&args.data).with_context(|| format!("load {}", args.data.display()))?;
    let mapping = auto_detect(&columns);
    Ok(ColumnsResult {
        data: args.data.clone(),
        columns,
        mapping,
    })
}

pub fn run_detect_mapping(args: &DetectMappingArgs) -> Result<()> {
    let data = &args.input.data;
    let columns = list_columns(data).with_context(|| format!("load {}", data.display()))?;
    let mapping = auto_detect(&columns);
    MappingStore::new(&args.out)
        .save(&mapping)
        .with_context(|| format!("save mapping {}", args.out.display()))?;
    println!("Mapping written to {}", args.out.display());
    Ok(())
}

/// Logs the first record's cells at trace level, redacted unless
/// `--log-data` is set.
fn trace_sample(records: &RecordSet) {
    let Some(first) = records.records.first() else {
        return;
    };
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for (field, value) in first.fields() {
        let text = value.to_string();
        trace!(
            field,
            value = redact_value(&text),
            log_data = log_data_enabled(),
            "first record"
        );
    }
}

fn generation_options(args: &GenerateArgs) -> GenerationOptions {
    let defaults = GenerationOptions::default();
    let case_insensitive_names = match args.name_case {
        NameCaseArg::Auto => defaults.case_insensitive_names,
        NameCaseArg::Sensitive => false,
        NameCaseArg::Insensitive => true,
    };
    GenerationOptions {
        jobs: args.jobs,
        case_insensitive_names,
    }
}
