//! Report rendering for real validation runs

use std::path::PathBuf;

use dsv7::cli::{OutputFormat, VerbosityLevel};
use dsv7::output::Output;
use dsv7::{Config, Runner};

use crate::common::test_helpers::*;

#[test]
fn test_human_report_names_file_and_problem() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let broken: PathBuf = temp_dir.path().join("kaputt/2024-05-04-Adorf-Meldung.DSV7");

    let results = Runner::new(&Config::default()).run(std::slice::from_ref(&broken));
    let report = Output::new(OutputFormat::Human, VerbosityLevel::Normal)
        .without_colors()
        .format_results(&results);

    let expected = format!(
        "{}: ERROR: Missing 'DATEIENDE' terminator line\n",
        broken.display()
    );
    assert!(report.starts_with(&expected), "{report}");
}

#[test]
fn test_clean_files_print_nothing() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let clean = temp_dir.path().join("2024-05-01-Duisburg-Wk.DSV7");

    let results = Runner::new(&Config::default()).run(&[clean]);
    let report = Output::new(OutputFormat::Human, VerbosityLevel::Normal)
        .without_colors()
        .format_results(&results);
    assert!(report.is_empty());
}

#[test]
fn test_json_report_is_parseable() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let files = vec![
        temp_dir.path().join("2024-05-01-Duisburg-Wk.DSV7"),
        temp_dir.path().join("kaputt/2024-05-04-Adorf-Meldung.DSV7"),
    ];

    let results = Runner::new(&Config::default()).run(&files);
    let report = Output::new(OutputFormat::Json, VerbosityLevel::Normal).format_results(&results);
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["total_files"], 2);
    assert_eq!(value["valid_files"], 1);
    assert_eq!(value["invalid_files"], 1);
    assert_eq!(
        value["list_types"],
        serde_json::json!(["Wettkampfdefinitionsliste", "Vereinsmeldeliste"])
    );
}
