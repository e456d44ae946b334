//! Streaming validation of DSV7 content.
//!
//! The validator reads its input line by line and keeps going past every
//! problem it finds, so that one pass yields the complete list of
//! diagnostics. Only failures to open the input are raised.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::cardinality::{ElementCounts, rules_for};
use crate::error::Result;
use crate::input::Input;
use crate::lex::{parse_element, parse_format};
use crate::list_type::ListType;
use crate::result::ValidationResult;
use crate::schema::schema_for;
use crate::stream::{self, Lines};

const TERMINATOR: &str = "DATEIENDE";

static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();
static FILENAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_version_regex() -> &'static Regex {
    VERSION_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Failed to compile version regex"))
}

fn get_filename_regex() -> &'static Regex {
    FILENAME_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-[^.]+\.DSV7$")
            .expect("Failed to compile filename regex")
    })
}

/// Validate `input` with default options.
pub fn validate(input: impl Into<Input>) -> Result<ValidationResult> {
    Validator::new().validate(input)
}

/// Validation entry point with options.
#[derive(Debug, Clone)]
pub struct Validator {
    check_filename: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            check_filename: true,
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about path inputs whose name does not follow
    /// `JJJJ-MM-TT-Ort-Zusatz.DSV7`. Enabled by default.
    pub fn check_filename(mut self, enabled: bool) -> Self {
        self.check_filename = enabled;
        self
    }

    pub fn validate(&self, input: impl Into<Input>) -> Result<ValidationResult> {
        let source = input.into().open()?;
        let mut result = ValidationResult::new();

        let (reader, had_bom) = stream::take_bom(source.reader)?;
        if had_bom {
            result.add_error("UTF-8 BOM detected (spec requires UTF-8 without BOM)");
        }

        let mut analyzer = LineAnalyzer::new(result);
        let mut had_crlf = false;
        for line in Lines::new(reader) {
            let line = line?;
            had_crlf |= line.crlf;
            if line.invalid_utf8 {
                analyzer.result.add_error("File is not valid UTF-8 encoding");
            }
            analyzer.process_line(&line.text, line.number);
        }

        if had_crlf {
            analyzer.result.add_warning("CRLF line endings detected");
        }
        let mut result = analyzer.finish();

        if self.check_filename
            && let Some(path) = source.path.as_deref()
        {
            check_filename(path, &mut result);
        }

        debug!(
            "Validation finished: {} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        );
        Ok(result)
    }
}

fn check_filename(path: &Path, result: &mut ValidationResult) {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return;
    };
    if !get_filename_regex().is_match(&name) {
        result.add_warning(format!(
            "Filename '{name}' does not follow 'JJJJ-MM-TT-Ort-Zusatz.DSV7'"
        ));
    }
}

/// Positional state of one validation run.
struct LineAnalyzer {
    result: ValidationResult,
    effective_lines: usize,
    format_line: Option<usize>,
    terminator_line: Option<usize>,
    first_after_terminator: Option<usize>,
    list_type: Option<ListType>,
    counts: ElementCounts,
}

impl LineAnalyzer {
    fn new(result: ValidationResult) -> Self {
        Self {
            result,
            effective_lines: 0,
            format_line: None,
            terminator_line: None,
            first_after_terminator: None,
            list_type: None,
            counts: ElementCounts::new(),
        }
    }

    fn process_line(&mut self, text: &str, number: usize) {
        if !stream::comments_balanced(text) {
            self.result
                .add_error(format!("Unmatched comment delimiters (line {number})"));
        }

        let content = stream::effective_content(text);
        if content.is_empty() {
            return;
        }

        self.effective_lines += 1;
        if self.effective_lines == 1 {
            self.format_line = Some(number);
            self.check_format_line(&content, number);
            return;
        }

        if content == TERMINATOR {
            debug!("Terminator at line {}", number);
            self.terminator_line = Some(number);
            return;
        }

        self.handle_content_line(&content, number);
    }

    fn check_format_line(&mut self, content: &str, number: usize) {
        let header = parse_format(content)
            .filter(|header| get_version_regex().is_match(&header.version));
        let Some(header) = header else {
            self.result.add_error(format!(
                "First non-empty line must be 'FORMAT:<Listentyp>;7;' (line {number})"
            ));
            return;
        };

        self.result.set_format(&header.list_type, &header.version);
        match header.list_type.parse::<ListType>() {
            Ok(list_type) => {
                debug!("Detected {} version {}", list_type, header.version);
                self.list_type = Some(list_type);
            }
            Err(_) => self.result.add_error(format!(
                "Unknown list type in FORMAT: '{}' (line {number})",
                header.list_type
            )),
        }
        if header.version != "7" {
            self.result.add_error(format!(
                "Unsupported format version '{}', expected '7' (line {number})",
                header.version
            ));
        }
    }

    fn handle_content_line(&mut self, content: &str, number: usize) {
        if self.terminator_line.is_some() && self.first_after_terminator.is_none() {
            self.first_after_terminator = Some(number);
        }

        if !content.contains(';') {
            self.result
                .add_error(format!("Missing attribute delimiter ';' (line {number})"));
        }

        let Some(list_type) = self.list_type else {
            return;
        };
        let Some(element) = parse_element(content) else {
            return;
        };
        if element.name == "FORMAT" || element.name == TERMINATOR {
            return;
        }

        self.counts.record(&element.name);
        schema_for(list_type).validate_element(&element, number, &mut self.result.errors);
    }

    fn finish(mut self) -> ValidationResult {
        if self.format_line.is_none() {
            self.result.add_error("Missing FORMAT line at top of file");
            return self.result;
        }

        match (self.terminator_line, self.first_after_terminator) {
            (None, _) => self.result.add_error("Missing 'DATEIENDE' terminator line"),
            (Some(_), Some(line)) => self
                .result
                .add_error(format!("Content found after 'DATEIENDE' (line {line})")),
            (Some(_), None) => {}
        }

        if let Some(list_type) = self.list_type {
            let errors = rules_for(list_type).check(list_type, &self.counts);
            self.result.errors.extend(errors);
        }

        self.result
    }
}
