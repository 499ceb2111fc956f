//! Tests for ersa-model types.

use ersa_model::{
    ColumnMapping, GeneratedFile, GenerationOutcome, LogicalParameter, ParameterKind,
    ParameterOverride, RecordError, SKIP_REASON_DIMENSIONS, SkipRecord, UNMAPPED,
};

#[test]
fn mapping_serializes_as_flat_object() {
    let mut mapping = ColumnMapping::new()
        .with(LogicalParameter::Stencil, "Board")
        .with(LogicalParameter::PcbLength, "Length");
    mapping.unset(LogicalParameter::CbsWidth);

    let json = serde_json::to_value(&mapping).expect("serialize mapping");
    assert_eq!(json["STENCIL"], "Board");
    assert_eq!(json["PCB_Length"], "Length");
    assert_eq!(json["CBS_Width"], UNMAPPED);
}

#[test]
fn mapping_keeps_unknown_keys() {
    let json = r#"{"STENCIL": "Name", "Heating_Top_Temp": "HZ_Top_Temp_Z"}"#;
    let mapping: ColumnMapping = serde_json::from_str(json).expect("parse mapping");
    assert_eq!(mapping.column(LogicalParameter::Stencil), Some("Name"));
    assert_eq!(mapping.column_for_key("Heating_Top_Temp"), Some("HZ_Top_Temp_Z"));

    let round: ColumnMapping =
        serde_json::from_str(&serde_json::to_string(&mapping).unwrap()).unwrap();
    assert_eq!(round, mapping);
}

#[test]
fn override_kind_defaults_to_numeric() {
    let item: ParameterOverride =
        serde_json::from_str(r#"{"column": "Z1", "path": "enmProg|enmZone|1|enmSngSoll"}"#)
            .expect("parse override");
    assert_eq!(item.kind, ParameterKind::Numeric);

    let item: ParameterOverride = serde_json::from_str(
        r#"{"column": "Fan", "path": "enmProg|enmFan|enmBlnSollAktiv", "kind": "boolean"}"#,
    )
    .expect("parse override");
    assert_eq!(item.kind, ParameterKind::Boolean);
}

#[test]
fn outcome_accounting() {
    let outcome = GenerationOutcome {
        success_count: 1,
        total_count: 3,
        skipped: vec![SkipRecord {
            program_name: "B".to_string(),
            reason: SKIP_REASON_DIMENSIONS.to_string(),
        }],
        errors: vec![RecordError {
            position: 3,
            program_name: "C".to_string(),
            reason: "disk full".to_string(),
        }],
        generated: vec![GeneratedFile {
            position: 1,
            program_name: "A".to_string(),
            file_name: "A.xml".to_string(),
            program_id: 10000,
            parameters_written: 4,
        }],
    };
    assert!(outcome.is_fully_accounted());
    assert!(outcome.has_errors());
    assert_eq!(outcome.skipped_count(), 1);
    assert!(SKIP_REASON_DIMENSIONS.contains("both required"));
}
