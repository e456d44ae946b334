use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path argument that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show the summary line and failures
    Quiet,
    /// Show diagnostics of failing files
    #[default]
    Normal,
    /// Also list clean files and timings
    Verbose,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per diagnostic
    #[default]
    Human,
    /// A single JSON document
    Json,
    /// Counts only
    Summary,
}

/// Validator for DSV7 swimming competition files
#[derive(Parser, Debug, Clone)]
#[command(name = "dsv7-validate")]
#[command(about = "Validate DSV7 files (Wettkampfdefinitionsliste, Vereinsmeldeliste, result lists)")]
#[command(version)]
pub struct Cli {
    /// Files or directories to validate; `-` reads standard input
    #[arg(required = true, num_args = 1.., help = "Files or directories to validate ('-' for stdin)")]
    pub paths: Vec<PathBuf>,

    /// File extensions to pick up in directories (comma-separated)
    #[arg(
        short = 'e',
        long = "extensions",
        help = "File extensions to process (e.g., 'DSV7,dsv')"
    )]
    pub extensions: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Report format
    #[arg(short = 'f', long = "format", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Include file patterns (glob syntax)
    #[arg(long = "include", action = clap::ArgAction::Append)]
    pub include_patterns: Vec<String>,

    /// Exclude file patterns (glob syntax)
    #[arg(long = "exclude", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to descend into
    #[arg(long = "max-depth")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while walking directories
    #[arg(long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Treat warnings as failures
    #[arg(long = "strict")]
    pub strict: bool,

    /// Stop after the first invalid file
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Skip the JJJJ-MM-TT-Ort-Zusatz.DSV7 filename check
    #[arg(long = "no-filename-check")]
    pub no_filename_check: bool,

    /// Print the parse events of valid files as JSON lines
    #[arg(long = "events")]
    pub events: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn get_extensions(&self) -> Option<Vec<String>> {
        self.extensions.as_ref().map(|extensions| {
            extensions
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        for path in &self.paths {
            if !is_stdin(path) && !path.exists() {
                return Err(format!("Path does not exist: {}", path.display()));
            }
        }
        if self.paths.iter().filter(|p| is_stdin(p)).count() > 1 {
            return Err("Standard input can only be read once".to_string());
        }
        Ok(())
    }
}

/// Whether a path argument means standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}
