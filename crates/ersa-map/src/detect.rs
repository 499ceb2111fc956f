//! Header-name heuristics.

use std::collections::HashMap;

use ersa_model::{ColumnMapping, LogicalParameter};

/// Lower-case header names that select a column, most preferred first.
pub fn keywords(param: LogicalParameter) -> &'static [&'static str] {
    match param {
        LogicalParameter::Stencil => &["stencil", "pcb", "name", "pcb_name", "program", "board_name"],
        LogicalParameter::PcbLength => &["length", "board_length", "pcb_length", "board_length_prn", "l"],
        LogicalParameter::PcbWidth => &["width", "pcb_width", "pcb width", "conveyor_width", "w"],
        LogicalParameter::CbsWidth => &["cbs", "cbs_width", "cbs width", "middle_support", "support"],
    }
}

/// Guesses a mapping from header names.
///
/// Matching is a case-insensitive equality test. When two headers differ only
/// in case the later one is used. Parameters without a match are left out.
pub fn auto_detect<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let by_lower: HashMap<String, &str> = headers
        .iter()
        .map(|header| (header.as_ref().to_lowercase(), header.as_ref()))
        .collect();

    let mut mapping = ColumnMapping::new();
    for param in LogicalParameter::ALL {
        let found = keywords(param)
            .iter()
            .find_map(|keyword| by_lower.get(*keyword).copied());
        if let Some(column) = found {
            tracing::debug!(parameter = param.key(), column, "auto-detected column");
            mapping.set(param, column);
        }
    }
    mapping
}

/// Combines a saved mapping with a fresh detection for the current headers.
///
/// Saved choices win when their column exists. A saved column that is gone
/// falls back to the detected column, or to unmapped. Extra keys in the saved
/// mapping are carried over unchanged.
pub fn merge<S: AsRef<str>>(
    saved: &ColumnMapping,
    detected: &ColumnMapping,
    headers: &[S],
) -> ColumnMapping {
    let present = |column: &str| headers.iter().any(|header| header.as_ref() == column);

    let mut merged = saved.clone();
    for param in LogicalParameter::ALL {
        match saved.column(param) {
            Some(column) if present(column) => {}
            stale => {
                if let Some(column) = stale {
                    tracing::warn!(
                        parameter = param.key(),
                        column,
                        "saved mapping names a column missing from the data"
                    );
                }
                match detected.column(param) {
                    Some(column) => merged.set(param, column),
                    None => merged.unset(param),
                }
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_keyword_priority() {
        let mapping = auto_detect(&["W", "Length", "Board_Name", "Stencil", "CBS Width"]);
        assert_eq!(mapping.column(LogicalParameter::Stencil), Some("Stencil"));
        assert_eq!(mapping.column(LogicalParameter::PcbLength), Some("Length"));
        assert_eq!(mapping.column(LogicalParameter::PcbWidth), Some("W"));
        assert_eq!(mapping.column(LogicalParameter::CbsWidth), Some("CBS Width"));
    }

    #[test]
    fn unmatched_parameters_stay_unmapped() {
        let mapping = auto_detect(&["Artikel", "Laenge"]);
        for param in LogicalParameter::ALL {
            assert!(!mapping.is_mapped(param));
        }
    }

    #[test]
    fn keywords_are_whole_header_matches() {
        let mapping = auto_detect(&["Board Length (mm)"]);
        assert!(!mapping.is_mapped(LogicalParameter::PcbLength));
    }

    #[test]
    fn merge_keeps_saved_columns_that_exist() {
        let headers = ["Name", "Len", "Width", "Support"];
        let saved = ColumnMapping::new()
            .with(LogicalParameter::Stencil, "Name")
            .with(LogicalParameter::PcbLength, "Len");
        let detected = auto_detect(&headers);
        let merged = merge(&saved, &detected, &headers);
        assert_eq!(merged.column(LogicalParameter::PcbLength), Some("Len"));
        assert_eq!(merged.column(LogicalParameter::PcbWidth), Some("Width"));
        assert_eq!(merged.column(LogicalParameter::CbsWidth), Some("Support"));
    }

    #[test]
    fn merge_replaces_stale_columns() {
        let headers = ["Stencil", "Length"];
        let saved = ColumnMapping::new()
            .with(LogicalParameter::PcbLength, "Old Length")
            .with(LogicalParameter::PcbWidth, "Old Width");
        let merged = merge(&saved, &auto_detect(&headers), &headers);
        assert_eq!(merged.column(LogicalParameter::PcbLength), Some("Length"));
        assert_eq!(merged.column(LogicalParameter::PcbWidth), None);
        assert_eq!(merged.column_for_key("PCB_Width"), None);
    }
}
