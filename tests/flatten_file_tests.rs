// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for flattening exported tables on disk

use regscan::{EmptyAnnotationPolicy, FlattenError, RecordFlattener, Table, MISSING};
use tempfile::TempDir;

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let err = RecordFlattener::default()
        .flatten_file(dir.path().join("absent.csv"), dir.path().join("out.csv"))
        .unwrap_err();

    assert!(matches!(err, FlattenError::FileNotFound { .. }));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_empty_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, "").unwrap();

    let err = RecordFlattener::default()
        .flatten_file(&input, dir.path().join("out.csv"))
        .unwrap_err();
    assert!(matches!(err, FlattenError::EmptyFile { .. }));
}

#[test]
fn test_table_without_payload_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("genes.csv");
    std::fs::write(&input, "name,coordinate\nTP53,17:1-2\n").unwrap();

    let err = RecordFlattener::default()
        .flatten_file(&input, dir.path().join("out.csv"))
        .unwrap_err();
    assert!(matches!(err, FlattenError::MissingPayloadColumn { .. }));
}

#[test]
fn test_python_style_payloads_are_flattened() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("output_genes.csv");
    let output = dir.path().join("flat").join("flat_output_genes.csv");
    std::fs::write(
        &input,
        concat!(
            "name,coordinate,biotype,regulatory_data\n",
            "TP53,17:7661779-7687538,protein_coding,",
            "\"[{'id': 'ENSR00000105157', 'start': 7661000, 'feature_type': 'Promoter'}, ",
            "{'id': 'ENSR2'}]\"\n",
            "MALAT1,11:65497688-65506516,lncRNA,[]\n",
            "GAPDH,12:6534512-6538374,protein_coding,not json at all\n",
        ),
    )
    .unwrap();

    RecordFlattener::default().flatten_file(&input, &output).unwrap();

    let flat = Table::read_csv(&output).unwrap();
    assert_eq!(
        flat.columns(),
        ["name", "coordinate", "biotype", "id", "start", "feature_type"]
    );
    assert_eq!(flat.len(), 3);
    assert_eq!(flat.get(0, "id"), Some("ENSR00000105157"));
    assert_eq!(flat.get(0, "start"), Some("7661000"));
    assert_eq!(flat.get(1, "id"), Some(MISSING));
    assert_eq!(flat.get(2, "feature_type"), Some(MISSING));
}

#[test]
fn test_drop_policy_on_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("output_genes.csv");
    let output = dir.path().join("flat_output_genes.csv");
    std::fs::write(
        &input,
        "name,regulatory_data\nA,\"[{\"\"id\"\": \"\"ENSR1\"\"}]\"\nB,[]\nC,\n",
    )
    .unwrap();

    RecordFlattener::new(EmptyAnnotationPolicy::Drop)
        .flatten_file(&input, &output)
        .unwrap();

    let flat = Table::read_csv(&output).unwrap();
    assert_eq!(flat.columns(), ["name", "id"]);
    assert_eq!(flat.rows(), [vec!["A".to_string(), "ENSR1".to_string()]]);
}
