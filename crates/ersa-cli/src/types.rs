use std::path::PathBuf;

use ersa_model::{ColumnMapping, GenerationOutcome};

use ersa_cli::pipeline::MappingSource;

#[derive(Debug)]
pub struct GenerateResult {
    pub output_dir: PathBuf,
    pub template: PathBuf,
    pub mapping_source: MappingSource,
    pub outcome: GenerationOutcome,
    pub skip_report: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub dry_run: bool,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct ColumnsResult {
    pub data: PathBuf,
    pub columns: Vec<String>,
    pub mapping: ColumnMapping,
}
