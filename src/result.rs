use serde::{Deserialize, Serialize};

/// Outcome of validating one input.
///
/// Diagnostics are kept in the order they were found. Warnings never affect
/// validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// List type as written in the FORMAT line, known or not.
    pub list_type: Option<String>,
    pub version: Option<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn set_format(&mut self, list_type: &str, version: &str) {
        self.list_type = Some(list_type.to_string());
        self.version = Some(version.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
