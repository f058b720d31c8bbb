//! Tests for IBIS file parsing

use ibisprobe::{parse_ibis_file, IbisParseError, IbisParser, IbisProbeError};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_parse_demo_device() {
    let result = parse_ibis_file(&fixture_path("demo_device.ibs"));
    assert!(result.is_ok(), "Should parse demo device: {:?}", result.err());

    let parsed = result.unwrap();

    // Last column of the C_comp line, verbatim
    assert_eq!(parsed.capacitance.as_deref(), Some("2.7pF"));

    // Six rows inside [Pin]; the row after [Voltage Range] is ignored
    assert_eq!(parsed.pin_count(), 6);
}

#[test]
fn test_parse_pin_columns() {
    let parsed = parse_ibis_file(&fixture_path("demo_device.ibs")).expect("Should parse");

    let m13 = parsed.pin("M13").expect("Should find M13");
    assert_eq!(m13.signal_name, "DQ0");
    assert_eq!(m13.model_name, "DQ_IO");
    assert_eq!(m13.resistance, "0.212");
    assert_eq!(m13.inductance, "2.10nH");
    assert_eq!(m13.capacitance, "1.50pF");
    assert_eq!(m13.line_number, 22);

    let m16 = parsed.pin("M16").expect("Should find M16");
    assert_eq!(m16.inductance, "1.98e-9");
    assert_eq!(m16.capacitance, "1.41e-12");
}

#[test]
fn test_rows_after_section_end_ignored() {
    let parsed = parse_ibis_file(&fixture_path("demo_device.ibs")).expect("Should parse");

    // A later M13 row outside [Pin] must not overwrite the table entry
    let m13 = parsed.pin("M13").unwrap();
    assert_eq!(m13.signal_name, "DQ0");
    assert!(!parsed.pins.values().any(|p| p.signal_name == "OUTSIDE"));
}

#[test]
fn test_pin_identifiers_case_sensitive() {
    let parsed = parse_ibis_file(&fixture_path("demo_device.ibs")).expect("Should parse");

    assert!(parsed.pin("a1").is_some());
    assert!(parsed.pin("A1").is_none());
}

#[test]
fn test_duplicate_pins_last_row_wins() {
    let parsed = parse_ibis_file(&fixture_path("duplicate_pins.ibs")).expect("Should parse");

    assert_eq!(parsed.pin_count(), 2);
    let pin = parsed.pin("7").unwrap();
    assert_eq!(pin.signal_name, "SECOND");
    assert_eq!(pin.model_name, "M2");
    assert_eq!(pin.inductance, "2.0nH");
    assert_eq!(pin.capacitance, "0.9pF");
}

#[test]
fn test_missing_ccomp_parses_without_capacitance() {
    let parsed = parse_ibis_file(&fixture_path("missing_ccomp.ibs")).expect("Should parse");

    assert!(parsed.capacitance.is_none());
    assert_eq!(parsed.pin_count(), 1);
}

#[test]
fn test_malformed_pin_row() {
    let result = IbisParser::parse_file(&fixture_path("malformed_pin.ibs"));

    match result {
        Err(IbisParseError::MalformedDataRow {
            line_number,
            line,
            fields,
        }) => {
            assert_eq!(line_number, 5);
            assert!(line.starts_with("2"));
            assert_eq!(fields, 3);
        }
        other => panic!("Expected MalformedDataRow, got {:?}", other),
    }
}

#[test]
fn test_parse_invalid_file() {
    let result = parse_ibis_file(&PathBuf::from("not_a_real_file.ibs"));
    assert!(
        matches!(result, Err(IbisProbeError::UnreadableFile { .. })),
        "Should fail on nonexistent file"
    );
}

#[test]
fn test_parse_is_idempotent() {
    let path = fixture_path("demo_device.ibs");
    let first = parse_ibis_file(&path).unwrap();
    let second = parse_ibis_file(&path).unwrap();
    assert_eq!(first, second);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(IbisParser::parse_str(&content).unwrap(), first);
}
