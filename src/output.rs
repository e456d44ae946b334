//! Output and Reporting
//!
//! Human-readable, JSON and summary renderings of [`ValidationResults`].

use std::time::Duration;

use serde_json::json;

use crate::cli::{OutputFormat, VerbosityLevel};
use crate::runner::{FileValidationResult, ValidationResults, ValidationStatus};

/// Output formatter for validation results
pub struct Output {
    format: OutputFormat,
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbosity: VerbosityLevel) -> Self {
        Self {
            format,
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Disable ANSI colors regardless of the terminal.
    pub fn without_colors(mut self) -> Self {
        self.show_colors = false;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_results(&self, results: &ValidationResults) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(results),
            OutputFormat::Json => format_json(results),
            OutputFormat::Summary => self.format_summary(results),
        }
    }

    fn format_human(&self, results: &ValidationResults) -> String {
        let mut output = String::new();

        for file_result in &results.file_results {
            output.push_str(&self.format_file_result(file_result));
        }

        if self.verbosity >= VerbosityLevel::Verbose {
            output.push_str(&self.format_summary(results));
        }

        output
    }

    /// Diagnostics of one file, one line each, prefixed by the path.
    pub fn format_file_result(&self, result: &FileValidationResult) -> String {
        let path = result.path.display();
        let mut output = String::new();

        match &result.status {
            ValidationStatus::Error { message } => {
                output.push_str(&format!("{}: {} {}\n", path, self.colorize("ERROR:", "31"), message));
                return output;
            }
            ValidationStatus::Skipped { reason } => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    output.push_str(&format!("{}: {} {}\n", path, self.colorize("SKIPPED:", "36"), reason));
                }
                return output;
            }
            ValidationStatus::Valid | ValidationStatus::Invalid { .. } => {}
        }

        for error in &result.errors {
            output.push_str(&format!("{}: {} {}\n", path, self.colorize("ERROR:", "31"), error));
        }

        if self.verbosity > VerbosityLevel::Quiet {
            for warning in &result.warnings {
                output.push_str(&format!(
                    "{}: {} {}\n",
                    path,
                    self.colorize("WARNING:", "33"),
                    warning
                ));
            }
        }

        if result.status.is_valid() && self.verbosity >= VerbosityLevel::Verbose {
            output.push_str(&format!(
                "{}: {} ({})\n",
                path,
                self.colorize("OK", "32"),
                format_duration(result.duration)
            ));
        }

        output
    }

    fn format_summary(&self, results: &ValidationResults) -> String {
        let mut output = String::new();
        output.push_str("Validation Summary:\n");
        output.push_str(&format!("  Total files: {}\n", results.total_files));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Valid:", "32"),
            results.valid_files
        ));

        if results.invalid_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Invalid:", "31"),
                results.invalid_files
            ));
        }
        if results.error_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Errors:", "31"),
                results.error_files
            ));
        }
        if results.skipped_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Skipped:", "36"),
                results.skipped_files
            ));
        }
        if results.warning_count > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Warnings:", "33"),
                results.warning_count
            ));
        }

        output.push_str(&format!("  Success rate: {:.1}%\n", results.success_rate()));
        output.push_str(&format!(
            "  Duration: {}\n",
            format_duration(results.total_duration)
        ));

        if self.verbosity >= VerbosityLevel::Verbose && !results.list_types.is_empty() {
            output.push_str(&format!("  List types: {}\n", results.list_types.join(", ")));
        }

        output
    }

    /// Parse events of valid files as JSON lines.
    pub fn format_events(&self, results: &ValidationResults) -> String {
        let mut output = String::new();
        for file_result in &results.file_results {
            let Some(events) = &file_result.events else {
                continue;
            };
            for event in events {
                let line = json!({
                    "path": file_result.path,
                    "event": event,
                });
                output.push_str(&line.to_string());
                output.push('\n');
            }
        }
        output
    }
}

fn format_json(results: &ValidationResults) -> String {
    match serde_json::to_string_pretty(results) {
        Ok(mut text) => {
            text.push('\n');
            text
        }
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();
    if total_secs < 1.0 {
        format!("{:.0}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0) as u64;
        let secs = total_secs % 60.0;
        format!("{}m{:.1}s", mins, secs)
    }
}
