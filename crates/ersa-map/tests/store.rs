use std::fs;

use ersa_map::{MapError, MappingStore, auto_detect, merge};
use ersa_model::{ColumnMapping, LogicalParameter, UNMAPPED};

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = MappingStore::new(dir.path().join("column_mapping_config.json"));
    assert!(store.load().expect("load").is_none());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = MappingStore::new(dir.path().join("nested/column_mapping_config.json"));
    let mapping = ColumnMapping::new()
        .with(LogicalParameter::Stencil, "Board")
        .with(LogicalParameter::PcbLength, "Length");

    store.save(&mapping).expect("save");
    let loaded = store.load().expect("load").expect("mapping present");
    assert_eq!(loaded.column(LogicalParameter::Stencil), Some("Board"));
    assert_eq!(loaded.column(LogicalParameter::PcbLength), Some("Length"));
    assert_eq!(loaded.column(LogicalParameter::CbsWidth), None);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).expect("read")).expect("json");
    assert_eq!(json["PCB_Width"], UNMAPPED);
    assert_eq!(json["CBS_Width"], UNMAPPED);
}

#[test]
fn reads_files_written_by_other_tools() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("column_mapping_config.json");
    fs::write(
        &path,
        r#"{
  "STENCIL": "PCB",
  "PCB_Length": "Board_Length_PRN",
  "PCB_Width": "(None)",
  "CBS_Width": "(None)",
  "Heating_Top_Temp": "HZ_Top"
}"#,
    )
    .expect("write mapping");

    let mapping = MappingStore::new(&path).load().expect("load").expect("present");
    assert_eq!(mapping.column(LogicalParameter::Stencil), Some("PCB"));
    assert!(!mapping.is_mapped(LogicalParameter::PcbWidth));
    assert_eq!(mapping.column_for_key("Heating_Top_Temp"), Some("HZ_Top"));
}

#[test]
fn invalid_json_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("column_mapping_config.json");
    fs::write(&path, "{ not json").expect("write");

    let err = MappingStore::new(&path).load().expect_err("invalid json");
    assert!(matches!(err, MapError::Json { .. }));
}

#[test]
fn saved_mapping_merged_with_current_headers() {
    let headers = vec!["PCB".to_string(), "Length".to_string(), "Width".to_string()];
    let saved = ColumnMapping::new()
        .with(LogicalParameter::Stencil, "PCB")
        .with(LogicalParameter::PcbWidth, "Conveyor");
    let merged = merge(&saved, &auto_detect(&headers), &headers);

    assert_eq!(merged.column(LogicalParameter::Stencil), Some("PCB"));
    assert_eq!(merged.column(LogicalParameter::PcbLength), Some("Length"));
    assert_eq!(merged.column(LogicalParameter::PcbWidth), Some("Width"));
    assert!(!merged.is_mapped(LogicalParameter::CbsWidth));
}
