//! Event parser tests through the public API

use std::io::Cursor;

use dsv7::{
    Dsv7Error, Input, ListType, ParseEvent, Result, parse, parse_list, parse_vereinsergebnisliste,
    parse_vereinsmeldeliste, parse_wettkampfdefinitionsliste, parse_wettkampfergebnisliste,
};

use crate::common::test_helpers::*;

fn collect(events: dsv7::Events) -> Vec<ParseEvent> {
    events.collect::<Result<Vec<_>>>().unwrap()
}

fn element_names(events: &[ParseEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Element { element, .. } => Some(element.name.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_each_list_type_has_a_parser() {
    let cases = [
        (parse_wettkampfdefinitionsliste(WKDL_MINIMAL).unwrap(), 12, 15),
        (parse_vereinsmeldeliste(VML_MINIMAL).unwrap(), 6, 9),
        (parse_wettkampfergebnisliste(ERG_MINIMAL).unwrap(), 8, 11),
        (parse_vereinsergebnisliste(VRL_MINIMAL).unwrap(), 8, 11),
    ];

    for (events, element_count, end_line) in cases {
        let events = collect(events);
        assert!(matches!(events[0], ParseEvent::Format { line: 2, .. }));
        assert_eq!(element_names(&events).len(), element_count);
        assert_eq!(events.last(), Some(&ParseEvent::End { line: end_line }));
    }
}

#[test]
fn test_generic_parser_accepts_all_list_types() {
    for list_type in ListType::ALL {
        let events = collect(parse(minimal(list_type)).unwrap());
        match &events[0] {
            ParseEvent::Format { header, .. } => {
                assert_eq!(header.list_type, list_type.as_str());
                assert_eq!(header.version, "7");
            }
            other => panic!("expected FORMAT event, got {other:?}"),
        }

        let pinned = collect(parse_list(minimal(list_type), list_type).unwrap());
        assert_eq!(events, pinned);
    }
}

#[test]
fn test_element_attributes_keep_empty_fields() {
    let events = collect(parse_wettkampfdefinitionsliste(WKDL_MINIMAL).unwrap());
    let ort = events
        .iter()
        .find_map(|event| match event {
            ParseEvent::Element { element, line } if element.name == "VERANSTALTUNGSORT" => {
                Some((element.clone(), *line))
            }
            _ => None,
        })
        .unwrap();

    assert_eq!(ort.1, 5);
    assert_eq!(ort.0.attrs.len(), 8);
    assert_eq!(ort.0.attr(1), "Schwimmstadion Duisburg-Wedau");
    assert_eq!(ort.0.attr(7), "Kein Fax");
    assert_eq!(ort.0.attr(8), "");
    assert_eq!(ort.0.attr(9), "");
}

#[test]
fn test_inline_comments_are_stripped() {
    let content = replace_line(
        VML_MINIMAL,
        "VEREIN:",
        "VEREIN:SV Hansa Adorf;1234;17;GER; (* Heimatverein *)",
    );
    let events = collect(parse_vereinsmeldeliste(content).unwrap());
    let verein = events
        .iter()
        .find_map(|event| match event {
            ParseEvent::Element { element, .. } if element.name == "VEREIN" => Some(element),
            _ => None,
        })
        .unwrap();
    assert_eq!(verein.attrs, vec!["SV Hansa Adorf", "1234", "17", "GER"]);
}

#[test]
fn test_content_is_not_validated() {
    let content = "FORMAT:Vereinsmeldeliste;7;\nVEREIN:nur ein Attribut;\nDATEIENDE\n";
    let events = collect(parse_vereinsmeldeliste(content).unwrap());
    assert_eq!(element_names(&events), vec!["VEREIN"]);
}

#[test]
fn test_pinned_parser_rejects_other_list_types() {
    let mut events = parse_vereinsergebnisliste(ERG_MINIMAL).unwrap();
    let error = events.next().unwrap().unwrap_err();
    assert!(matches!(
        error,
        Dsv7Error::UnexpectedListType { parser: "VRL", .. }
    ));
    assert_eq!(
        error.to_string(),
        "Unsupported list type 'Wettkampfergebnisliste' for VRL parser"
    );
    assert!(events.next().is_none());
}

#[test]
fn test_missing_format_is_fatal() {
    let mut events = parse(remove_lines(VML_MINIMAL, "FORMAT:")).unwrap();
    assert!(matches!(
        events.next(),
        Some(Err(Dsv7Error::MalformedHeader { line: 2 }))
    ));
    assert!(events.next().is_none());
}

#[test]
fn test_unsupported_version_is_fatal() {
    let content = replace_line(WKDL_MINIMAL, "FORMAT:", "FORMAT:Wettkampfdefinitionsliste;8;");
    let mut events = parse_wettkampfdefinitionsliste(content).unwrap();
    let error = events.next().unwrap().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unsupported format version '8', expected '7'"
    );
}

#[test]
fn test_reader_and_path_inputs() {
    let reader = Input::from_reader(Cursor::new(VML_MINIMAL.as_bytes().to_vec()));
    let from_reader = collect(parse(reader).unwrap());

    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join(VALID_FILE_NAME);
    create_test_file(&path, VML_MINIMAL).unwrap();
    let from_path = collect(parse(path.as_path()).unwrap());

    assert_eq!(from_reader, from_path);
    assert!(matches!(
        parse(temp_dir.path().join("gone.DSV7")),
        Err(Dsv7Error::Io(_))
    ));
}

#[test]
fn test_crlf_input_parses_like_lf() {
    let lf = collect(parse(VML_MINIMAL).unwrap());
    let crlf = collect(parse(with_crlf(VML_MINIMAL)).unwrap());
    assert_eq!(lf, crlf);
}

#[test]
fn test_format_event_json() {
    let events = collect(parse(VML_MINIMAL).unwrap());
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "event": "format",
            "list_type": "Vereinsmeldeliste",
            "version": "7",
            "line": 2
        })
    );
}
