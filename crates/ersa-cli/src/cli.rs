//! CLI argument definitions for the ERSA program generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ersa_cli::config::MetadataArgs;
use ersa_map::DEFAULT_MAPPING_FILE;

#[derive(Parser)]
#[command(
    name = "ersa",
    version,
    about = "ERSA soldering program generator - build machine programs from a board list",
    long_about = "Generate one ERSA selective-soldering program per board from a spreadsheet.\n\n\
                  Each row supplies a board name, PCB length and width, and an optional CBS\n\
                  support width. A template program export supplies everything else."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw spreadsheet cell values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate one program file per board.
    Generate(GenerateArgs),

    /// Show the columns of a data file and the auto-detected mapping.
    Columns(DataArgs),

    /// Write the auto-detected column mapping to a file.
    DetectMapping(DetectMappingArgs),
}

#[derive(Parser)]
pub struct DataArgs {
    /// Board list (csv, xlsx, xlsm, xls, xlsb or ods).
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,
}

#[derive(Parser)]
pub struct DetectMappingArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Mapping file to write.
    #[arg(long = "out", value_name = "FILE", default_value = DEFAULT_MAPPING_FILE)]
    pub out: PathBuf,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Template program export. Defaults to template.xml (or a variant) in --template-dir.
    #[arg(long = "template", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory searched for a template when --template is not given.
    #[arg(long = "template-dir", value_name = "DIR", default_value = ".")]
    pub template_dir: PathBuf,

    /// Output directory for generated programs.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "Generated_Programs")]
    pub output_dir: PathBuf,

    /// Column mapping file. Detected from the headers when the file is absent.
    #[arg(long = "mapping", value_name = "FILE", default_value = DEFAULT_MAPPING_FILE)]
    pub mapping: PathBuf,

    /// Write the effective mapping back to --mapping.
    #[arg(long = "save-mapping")]
    pub save_mapping: bool,

    /// Run configuration (JSON with metadata settings and overrides).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Export skipped programs to this CSV file.
    #[arg(long = "skip-report", value_name = "FILE")]
    pub skip_report: Option<PathBuf>,

    /// Write the run outcome as JSON.
    #[arg(long = "summary-json", value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Worker threads (1 = sequential, 0 = one per core).
    #[arg(long = "jobs", value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// How output file names are compared when checking for collisions.
    #[arg(long = "name-case", value_enum, default_value_t = NameCaseArg::Auto)]
    pub name_case: NameCaseArg,

    /// Build and serialize every program without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Output name comparison for collision checks.
#[derive(Clone, Copy, ValueEnum)]
pub enum NameCaseArg {
    /// Follow the host filesystem (case-insensitive on Windows and macOS).
    Auto,
    /// `Board.xml` and `BOARD.xml` are different files.
    Sensitive,
    /// `Board.xml` and `BOARD.xml` collide.
    Insensitive,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
