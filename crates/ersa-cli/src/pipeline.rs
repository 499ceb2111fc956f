//! Input resolution shared by the CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{info, warn};

use ersa_map::{MappingStore, auto_detect, merge};
use ersa_model::{ColumnMapping, LogicalParameter};
use ersa_template::{TEMPLATE_NAMES, discover_template};

/// Where the effective column mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSource {
    /// Saved mapping file, possibly patched by auto-detection.
    Saved,
    /// No mapping file; detected from the headers.
    Detected,
}

#[derive(Debug, Clone)]
pub struct ResolvedMapping {
    pub mapping: ColumnMapping,
    pub source: MappingSource,
}

/// Picks the template: an explicit path wins, otherwise the conventional
/// names are probed in `search_dir`.
pub fn resolve_template(explicit: Option<&Path>, search_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match discover_template(search_dir) {
        Some(path) => {
            info!(path = %path.display(), "using discovered template");
            Ok(path)
        }
        None => bail!(
            "no template found in {} (looked for {}); pass --template",
            search_dir.display(),
            TEMPLATE_NAMES.join(", ")
        ),
    }
}

/// Loads the saved mapping at `store` and reconciles it with `headers`, or
/// detects one from the headers when no file exists.
pub fn resolve_mapping(store: &MappingStore, headers: &[String]) -> Result<ResolvedMapping> {
    let detected = auto_detect(headers);
    let resolved = match store.load()? {
        Some(saved) => ResolvedMapping {
            mapping: merge(&saved, &detected, headers),
            source: MappingSource::Saved,
        },
        None => ResolvedMapping {
            mapping: detected,
            source: MappingSource::Detected,
        },
    };
    for param in [LogicalParameter::PcbLength, LogicalParameter::PcbWidth] {
        if !resolved.mapping.is_mapped(param) {
            warn!(parameter = param.key(), "required parameter is not mapped, every record will be skipped");
        }
    }
    Ok(resolved)
}
