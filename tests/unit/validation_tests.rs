//! Validation tests for the dsv7 library
//!
//! These tests drive `validate` and `Validator` through the public API and
//! check the exact diagnostics produced for each kind of problem.

use std::io::Cursor;

use tempfile::TempDir;

use dsv7::{Dsv7Error, Input, ListType, ValidationResult, Validator, validate};

use crate::common::test_helpers::*;

fn run(content: &str) -> ValidationResult {
    validate(content).unwrap()
}

#[test]
fn test_minimal_lists_are_valid() {
    for list_type in ListType::ALL {
        let result = run(minimal(list_type));
        assert!(result.errors.is_empty(), "{list_type}: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "{list_type}: {:?}", result.warnings);
        assert_eq!(result.list_type.as_deref(), Some(list_type.as_str()));
        assert_eq!(result.version.as_deref(), Some("7"));
    }
}

#[test]
fn test_bom_is_an_error() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(VML_MINIMAL.as_bytes());

    let result = validate(bytes).unwrap();
    assert_eq!(
        result.errors,
        vec!["UTF-8 BOM detected (spec requires UTF-8 without BOM)"]
    );
}

#[test]
fn test_crlf_is_a_warning() {
    let result = run(&with_crlf(VML_MINIMAL));
    assert!(result.is_valid());
    assert_eq!(result.warnings, vec!["CRLF line endings detected"]);
}

#[test]
fn test_invalid_utf8_line() {
    let content = replace_line(VML_MINIMAL, "VEREIN:", "VEREIN:SV \u{0}Hansa;1234;17;GER;");
    let bytes: Vec<u8> = content
        .into_bytes()
        .into_iter()
        .map(|b| if b == 0 { 0xFF } else { b })
        .collect();

    let result = validate(bytes).unwrap();
    assert_eq!(result.errors, vec!["File is not valid UTF-8 encoding"]);
}

#[test]
fn test_missing_format_line() {
    assert_eq!(run("").errors, vec!["Missing FORMAT line at top of file"]);
    assert_eq!(
        run("(* nur ein Kommentar *)\n\n").errors,
        vec!["Missing FORMAT line at top of file"]
    );
}

#[test]
fn test_first_line_must_be_format() {
    let result = run("VEREIN:SV Hansa Adorf;1234;17;GER;\nDATEIENDE\n");
    assert_eq!(
        result.errors,
        vec!["First non-empty line must be 'FORMAT:<Listentyp>;7;' (line 1)"]
    );
    assert!(result.list_type.is_none());
}

#[test]
fn test_unknown_list_type() {
    let result = run("FORMAT:Unbekannt;7;\nX:1;\nDATEIENDE\n");
    assert_eq!(
        result.errors,
        vec!["Unknown list type in FORMAT: 'Unbekannt' (line 1)"]
    );
    assert_eq!(result.list_type.as_deref(), Some("Unbekannt"));
}

#[test]
fn test_unsupported_version() {
    let content = replace_line(VML_MINIMAL, "FORMAT:", "FORMAT:Vereinsmeldeliste;6;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec!["Unsupported format version '6', expected '7' (line 2)"]
    );
}

#[test]
fn test_missing_terminator() {
    let result = run(&remove_lines(VML_MINIMAL, "DATEIENDE"));
    assert_eq!(result.errors, vec!["Missing 'DATEIENDE' terminator line"]);
}

#[test]
fn test_content_after_terminator_reported_once() {
    let content = format!("{VML_MINIMAL}KOMMENTAR:eins;\nKOMMENTAR:zwei;\n");
    let result = run(&content);
    assert_eq!(result.errors, vec!["Content found after 'DATEIENDE' (line 10)"]);
}

#[test]
fn test_blank_lines_after_terminator_are_fine() {
    let content = format!("{VML_MINIMAL}\n   \n(* Ende *)\n");
    assert!(run(&content).is_valid());
}

#[test]
fn test_missing_attribute_delimiter() {
    let content = insert_before_terminator(VML_MINIMAL, "KEIN TRENNER");
    let result = run(&content);
    assert_eq!(result.errors, vec!["Missing attribute delimiter ';' (line 9)"]);
}

#[test]
fn test_unmatched_comment() {
    let content = insert_before_terminator(VML_MINIMAL, "(* offen;");
    let result = run(&content);
    assert!(
        result
            .errors
            .contains(&"Unmatched comment delimiters (line 9)".to_string())
    );
}

#[test]
fn test_inline_comments_are_ignored() {
    let content = replace_line(
        VML_MINIMAL,
        "VEREIN:",
        "VEREIN:SV Hansa Adorf;1234;17;GER; (* Heimatverein *)",
    );
    assert!(run(&content).is_valid());
}

#[test]
fn test_attribute_type_error() {
    let content = replace_line(VML_MINIMAL, "ABSCHNITT:", "ABSCHNITT:1;32.01.2024;10:00;N;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec!["Element ABSCHNITT, attribute 2: impossible date '32.01.2024' (line 5)"]
    );
}

#[test]
fn test_attribute_count_and_required_attribute() {
    let content = replace_line(VML_MINIMAL, "VEREIN:", "VEREIN:SV Hansa Adorf;1234;17;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec![
            "Element VEREIN: expected 4 attributes, got 3 (line 7)",
            "Element VEREIN: missing required attribute 4 (line 7)",
        ]
    );
}

#[test]
fn test_unknown_elements_are_ignored() {
    let content = insert_before_terminator(VML_MINIMAL, "GIBTSNICHT:a;b;");
    assert!(run(&content).is_valid());
}

#[test]
fn test_vml_cardinality() {
    let result = run(&remove_lines(VML_MINIMAL, "ANSPRECHPARTNER:"));
    assert_eq!(
        result.errors,
        vec!["Vereinsmeldeliste: missing required element 'ANSPRECHPARTNER'"]
    );

    let content = insert_before_terminator(VML_MINIMAL, "VEREIN:SV Zwei;4321;17;GER;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec!["Vereinsmeldeliste: element 'VEREIN' occurs 2 times (expected 1)"]
    );
}

#[test]
fn test_wkdl_meldegeld_requires_wettkampf() {
    let content = insert_before_terminator(WKDL_MINIMAL, "MELDEGELD:WKMELDEGELD;5,00;;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec!["Element MELDEGELD: 'WKMELDEGELD' requires Wettkampfnr (attr 3) (line 15)"]
    );

    let content = insert_before_terminator(WKDL_MINIMAL, "MELDEGELD:WKMELDEGELD;5,00;1;");
    assert!(run(&content).is_valid());
}

#[test]
fn test_wkdl_at_most_one() {
    let content = insert_before_terminator(WKDL_MINIMAL, "BESONDERES:eins;\nBESONDERES:zwei;");
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec!["Wettkampfdefinitionsliste: element 'BESONDERES' occurs 2 times (max 1)"]
    );
}

#[test]
fn test_wkdl_requires_wertung() {
    let result = run(&remove_lines(WKDL_MINIMAL, "WERTUNG:"));
    assert_eq!(
        result.errors,
        vec!["Wettkampfdefinitionsliste: missing required element 'WERTUNG'"]
    );
}

#[test]
fn test_result_lists_skip_cardinality_when_empty() {
    for list_type in [
        ListType::Wettkampfergebnisliste,
        ListType::Vereinsergebnisliste,
    ] {
        let content = format!("FORMAT:{list_type};7;\nDATEIENDE\n");
        assert!(run(&content).is_valid(), "{list_type}");
    }

    let result = run("FORMAT:Vereinsmeldeliste;7;\nDATEIENDE\n");
    assert_eq!(result.errors.len(), 6);
}

#[test]
fn test_result_list_cardinality() {
    let result = run(&remove_lines(ERG_MINIMAL, "VEREIN:"));
    assert_eq!(
        result.errors,
        vec!["Wettkampfergebnisliste: missing required element 'VEREIN'"]
    );

    let result = run(&remove_lines(VRL_MINIMAL, "AUSRICHTER:"));
    assert_eq!(
        result.errors,
        vec!["Vereinsergebnisliste: missing required element 'AUSRICHTER'"]
    );
}

#[test]
fn test_result_list_elements() {
    let content = insert_before_terminator(
        VRL_MINIMAL,
        "PERSON:Beispiel, Bob;123456;1;M;2010;;GER;;;\n\
         PERSONENERGEBNIS:1;1;A;1;3;00:01:02,34;;;;",
    );
    assert!(run(&content).is_valid());

    let content = insert_before_terminator(
        VRL_MINIMAL,
        "PERSONENERGEBNIS:1;1;A;1;3;00:61:02,34;XX;;;",
    );
    let result = run(&content);
    assert_eq!(
        result.errors,
        vec![
            "Element PERSONENERGEBNIS, attribute 6: time out of range '00:61:02,34' (line 11)",
            "Element PERSONENERGEBNIS, attribute 7: invalid Grund der Nichtwertung 'XX' (allowed: DS, NA, AB, AU, ZU) (line 11)",
        ]
    );
}

#[test]
fn test_filename_convention() {
    let temp_dir = TempDir::new().unwrap();

    let good = temp_dir.path().join(VALID_FILE_NAME);
    create_test_file(&good, VML_MINIMAL).unwrap();
    assert!(validate(good.as_path()).unwrap().warnings.is_empty());

    let bad = temp_dir.path().join("meldung.dsv7");
    create_test_file(&bad, VML_MINIMAL).unwrap();
    assert_eq!(
        validate(bad.as_path()).unwrap().warnings,
        vec!["Filename 'meldung.dsv7' does not follow 'JJJJ-MM-TT-Ort-Zusatz.DSV7'"]
    );

    let result = Validator::new().check_filename(false).validate(bad).unwrap();
    assert!(result.warnings.is_empty());
}

#[test]
fn test_unsupported_inputs() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        validate(temp_dir.path()),
        Err(Dsv7Error::UnsupportedInput { .. })
    ));
    assert!(matches!(
        validate(temp_dir.path().join("gone.DSV7")),
        Err(Dsv7Error::Io(_))
    ));
}

#[test]
fn test_reader_input() {
    let input = Input::from_reader(Cursor::new(ERG_MINIMAL.as_bytes().to_vec()));
    let result = validate(input).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.list_type.as_deref(), Some("Wettkampfergebnisliste"));
}

#[test]
fn test_same_result_for_every_input_shape() {
    let content = remove_lines(WKDL_MINIMAL, "MELDESCHLUSS:");
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("2024-01-01-Ort-Wk.DSV7");
    create_test_file(&path, &content).unwrap();

    let from_string = validate(content.as_str()).unwrap();
    let from_reader = validate(Input::from_reader(Cursor::new(content.clone().into_bytes()))).unwrap();
    let from_path = validate(path).unwrap();

    assert_eq!(from_string, from_reader);
    assert_eq!(from_string, from_path);
    assert_eq!(
        from_string.errors,
        vec!["Wettkampfdefinitionsliste: missing required element 'MELDESCHLUSS'"]
    );
}
