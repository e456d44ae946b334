use std::path::PathBuf;

use thiserror::Error;

/// Conditions the library raises instead of accumulating.
///
/// Content problems never show up here: the validator collects them as
/// diagnostics. Only input handling and, on the event parsing path, FORMAT
/// header violations are raised.
#[derive(Error, Debug)]
pub enum Dsv7Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported input: {path} is not a regular file")]
    UnsupportedInput { path: PathBuf },

    #[error("First non-empty line must be FORMAT (line {line})")]
    MalformedHeader { line: usize },

    #[error("Unsupported list type '{list_type}' for {parser} parser")]
    UnexpectedListType {
        list_type: String,
        parser: &'static str,
    },

    #[error("Unknown list type '{list_type}'")]
    UnknownListType { list_type: String },

    #[error("Unsupported format version '{version}', expected '7'")]
    UnsupportedVersion { version: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Dsv7Error>;
