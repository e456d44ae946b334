//! Multi-file validation runs.
//!
//! The runner validates discovered files one after another, times each
//! file and folds everything into [`ValidationResults`] for reporting.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cli::{STDIN_PATH, is_stdin};
use crate::config::Config;
use crate::error::{Dsv7Error, Result};
use crate::input::Input;
use crate::parser::{self, ParseEvent};
use crate::result::ValidationResult;
use crate::validator::Validator;

/// Status of a single file validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationStatus {
    /// No errors (and no warnings in strict mode)
    Valid,
    /// Content problems were found. Warnings only fail a file in strict mode.
    Invalid {
        error_count: usize,
        warning_count: usize,
    },
    /// The input could not be read
    Error { message: String },
    /// Not validated because an earlier file failed under fail-fast
    Skipped { reason: String },
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationStatus::Invalid { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationStatus::Error { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ValidationStatus::Skipped { .. })
    }
}

/// Result of validating a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileValidationResult {
    /// Path to the validated file, `-` for standard input
    pub path: PathBuf,
    pub status: ValidationStatus,
    /// List type named by the FORMAT line
    pub list_type: Option<String>,
    pub duration: Duration,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Parse events, collected for valid files when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<ParseEvent>>,
}

impl FileValidationResult {
    /// Classify a finished validation. Under `strict`, warnings count as
    /// failures.
    pub fn from_result(
        path: PathBuf,
        result: ValidationResult,
        strict: bool,
        duration: Duration,
    ) -> Self {
        let status = if !result.errors.is_empty() || (strict && !result.warnings.is_empty()) {
            ValidationStatus::Invalid {
                error_count: result.errors.len(),
                warning_count: result.warnings.len(),
            }
        } else {
            ValidationStatus::Valid
        };

        Self {
            path,
            status,
            list_type: result.list_type,
            duration,
            errors: result.errors,
            warnings: result.warnings,
            events: None,
        }
    }

    pub fn error(path: PathBuf, error: Dsv7Error, duration: Duration) -> Self {
        Self {
            path,
            status: ValidationStatus::Error {
                message: error.to_string(),
            },
            list_type: None,
            duration,
            errors: vec![error.to_string()],
            warnings: Vec::new(),
            events: None,
        }
    }

    pub fn skipped(path: PathBuf, reason: String) -> Self {
        Self {
            path,
            status: ValidationStatus::Skipped { reason },
            list_type: None,
            duration: Duration::ZERO,
            errors: Vec::new(),
            warnings: Vec::new(),
            events: None,
        }
    }
}

/// Aggregated results of validating multiple files
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResults {
    pub total_files: usize,
    pub valid_files: usize,
    pub invalid_files: usize,
    pub error_files: usize,
    pub skipped_files: usize,
    /// Warnings across all files
    pub warning_count: usize,
    pub total_duration: Duration,
    pub average_duration: Duration,
    /// Distinct list types seen, in first-seen order
    pub list_types: Vec<String>,
    pub file_results: Vec<FileValidationResult>,
}

impl ValidationResults {
    /// Aggregate individual file results into summary
    pub fn aggregate(file_results: Vec<FileValidationResult>) -> Self {
        let total_files = file_results.len();
        let mut valid_files = 0;
        let mut invalid_files = 0;
        let mut error_files = 0;
        let mut skipped_files = 0;
        let mut warning_count = 0;
        let mut total_duration = Duration::ZERO;
        let mut list_types: Vec<String> = Vec::new();

        for result in &file_results {
            match result.status {
                ValidationStatus::Valid => valid_files += 1,
                ValidationStatus::Invalid { .. } => invalid_files += 1,
                ValidationStatus::Error { .. } => error_files += 1,
                ValidationStatus::Skipped { .. } => skipped_files += 1,
            }

            warning_count += result.warnings.len();
            total_duration += result.duration;

            if let Some(list_type) = &result.list_type
                && !list_types.contains(list_type)
            {
                list_types.push(list_type.clone());
            }
        }

        let average_duration = if total_files > 0 {
            total_duration / total_files as u32
        } else {
            Duration::ZERO
        };

        Self {
            total_files,
            valid_files,
            invalid_files,
            error_files,
            skipped_files,
            warning_count,
            total_duration,
            average_duration,
            list_types,
            file_results,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.valid_files == self.total_files
    }

    pub fn has_errors(&self) -> bool {
        self.invalid_files > 0 || self.error_files > 0
    }

    /// Percentage of files that passed
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.valid_files as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Sequential validation of a list of inputs.
#[derive(Debug, Clone)]
pub struct Runner {
    validator: Validator,
    strict: bool,
    fail_fast: bool,
    collect_events: bool,
}

impl Runner {
    pub fn new(config: &Config) -> Self {
        Self {
            validator: Validator::new().check_filename(config.validation.check_filename),
            strict: config.validation.strict,
            fail_fast: config.validation.fail_fast,
            collect_events: config.output.events,
        }
    }

    /// Validate every path in order. Under fail-fast, files after the first
    /// failure are reported as skipped.
    pub fn run(&self, paths: &[PathBuf]) -> ValidationResults {
        let mut file_results = Vec::with_capacity(paths.len());
        let mut stopped = false;

        for path in paths {
            if stopped {
                file_results.push(FileValidationResult::skipped(
                    path.clone(),
                    "Stopped after first failure".to_string(),
                ));
                continue;
            }

            let result = self.validate_path(path);
            if self.fail_fast && (result.status.is_invalid() || result.status.is_error()) {
                info!("Fail-fast: stopping after {}", path.display());
                stopped = true;
            }
            file_results.push(result);
        }

        ValidationResults::aggregate(file_results)
    }

    /// Validate one path; `-` reads standard input.
    pub fn validate_path(&self, path: &Path) -> FileValidationResult {
        let start = Instant::now();
        debug!("Validating {}", path.display());

        let outcome = if is_stdin(path) {
            read_stdin().and_then(|bytes| self.check(bytes.clone(), move || bytes.into()))
        } else {
            let owned = path.to_path_buf();
            self.check(path, move || owned.into())
        };

        let duration = start.elapsed();
        match outcome {
            Ok((result, events)) => {
                let mut file_result =
                    FileValidationResult::from_result(path.to_path_buf(), result, self.strict, duration);
                if file_result.status.is_valid() {
                    file_result.events = events;
                }
                file_result
            }
            Err(e) => {
                warn!("Failed to validate {}: {}", path.display(), e);
                FileValidationResult::error(path.to_path_buf(), e, duration)
            }
        }
    }

    fn check<F>(
        &self,
        input: impl Into<Input>,
        reopen: F,
    ) -> Result<(ValidationResult, Option<Vec<ParseEvent>>)>
    where
        F: FnOnce() -> Input,
    {
        let result = self.validator.validate(input)?;
        if !self.collect_events || !result.is_valid() {
            return Ok((result, None));
        }
        let events = parser::parse(reopen())?.collect::<Result<Vec<_>>>()?;
        Ok((result, Some(events)))
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    std::io::stdin().lock().read_to_end(&mut bytes)?;
    debug!("Read {} bytes from {}", bytes.len(), STDIN_PATH);
    Ok(bytes)
}
