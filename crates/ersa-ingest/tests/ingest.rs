use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use ersa_ingest::{IngestError, list_columns, read_records};
use ersa_model::RawValue;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_csv_records_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "boards.csv",
        b"Stencil,PCB Length,PCB Width,CBS\nA-1,100,50,NA\nB-2,,50,\nC-3,120.5,80,75\n",
    );

    let set = read_records(&path).expect("read csv");
    assert_eq!(set.columns, vec!["Stencil", "PCB Length", "PCB Width", "CBS"]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.records[0].get("Stencil"), Some(&RawValue::from("A-1")));
    assert_eq!(set.records[1].get("PCB Length"), Some(&RawValue::Empty));
    assert_eq!(set.records[2].get("CBS"), Some(&RawValue::from("75")));
}

#[test]
fn csv_headers_are_normalized_and_unique() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "boards.csv",
        "\u{feff} Board   Name ,Width,Width,\nX,1,2,3\n".as_bytes(),
    );

    let columns = list_columns(&path).expect("list columns");
    assert_eq!(columns, vec!["Board Name", "Width", "Width.1", "Unnamed: 3"]);
}

#[test]
fn leading_blank_lines_and_ragged_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "boards.csv", b",,\nStencil,Length,Width\nA,100\n,,\nB,1,2\n");

    let set = read_records(&path).expect("read csv");
    assert_eq!(set.columns, vec!["Stencil", "Length", "Width"]);
    assert_eq!(set.len(), 2);
    assert_eq!(set.records[0].get("Width"), Some(&RawValue::Empty));
}

#[test]
fn quoted_fields_keep_commas() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "boards.csv", b"Stencil,Notes\n\"A, rev 2\",\"x\"\n");

    let set = read_records(&path).expect("read csv");
    assert_eq!(set.records[0].get("Stencil"), Some(&RawValue::from("A, rev 2")));
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "empty.csv", b"\n\n");

    let err = read_records(&path).expect_err("empty input");
    assert!(matches!(err, IngestError::Empty { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "boards.json", b"{}");

    let err = read_records(&path).expect_err("unsupported");
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_csv_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_records(&dir.path().join("missing.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::Csv { .. }));
}

#[test]
fn corrupt_workbook_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "boards.xlsx", b"not a zip archive");

    let err = read_records(&path).expect_err("corrupt workbook");
    assert!(matches!(err, IngestError::Workbook { .. }));
}
