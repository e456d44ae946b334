//! Input sources accepted by the validator and the parser.
//!
//! An [`Input`] is resolved exactly once into a [`Source`], which owns a
//! buffered reader over the bytes. Files opened from a path are closed when
//! the source is dropped.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Dsv7Error, Result};

/// One of the three supported input shapes.
pub enum Input {
    /// An already open byte stream.
    Reader(Box<dyn Read>),
    /// Path to an existing regular file.
    Path(PathBuf),
    /// Complete file content held in memory.
    Bytes(Vec<u8>),
}

impl Input {
    /// Standard input as a byte stream.
    pub fn stdin() -> Self {
        Input::Reader(Box::new(io::stdin()))
    }

    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Input::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Resolve into a readable source. Fails for missing paths and for paths
    /// that are not regular files.
    pub(crate) fn open(self) -> Result<Source> {
        match self {
            Input::Reader(reader) => Ok(Source::new(Box::new(BufReader::new(reader)), None)),
            Input::Bytes(bytes) => Ok(Source::new(Box::new(Cursor::new(bytes)), None)),
            Input::Path(path) => {
                let metadata = fs::metadata(&path)?;
                if !metadata.is_file() {
                    return Err(Dsv7Error::UnsupportedInput { path });
                }
                debug!("Opening {}", path.display());
                let file = File::open(&path)?;
                Ok(Source::new(Box::new(BufReader::new(file)), Some(path)))
            }
        }
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Reader(_) => f.write_str("Input::Reader(..)"),
            Input::Path(path) => f.debug_tuple("Input::Path").field(path).finish(),
            Input::Bytes(bytes) => write!(f, "Input::Bytes({} bytes)", bytes.len()),
        }
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Input::Bytes(bytes.to_vec())
    }
}

/// Strings are treated as file content, never as a path.
impl From<&str> for Input {
    fn from(content: &str) -> Self {
        Input::Bytes(content.as_bytes().to_vec())
    }
}

impl From<String> for Input {
    fn from(content: String) -> Self {
        Input::Bytes(content.into_bytes())
    }
}

impl From<&Path> for Input {
    fn from(path: &Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

/// A resolved input.
pub(crate) struct Source {
    pub(crate) reader: Box<dyn BufRead>,
    pub(crate) path: Option<PathBuf>,
}

impl Source {
    fn new(reader: Box<dyn BufRead>, path: Option<PathBuf>) -> Self {
        Self { reader, path }
    }
}
