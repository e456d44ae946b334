use crate::config::{ConfigError, FileConfig, Result};
use globset::{GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Finds DSV7 files below the paths given on the command line
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    /// File extensions to include, lowercased
    extensions: Vec<String>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
    /// Maximum depth below a root directory (None = unlimited)
    max_depth: Option<usize>,
    follow_symlinks: bool,
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self {
            extensions: vec!["dsv7".to_string()],
            include_set: None,
            exclude_set: None,
            max_depth: None,
            follow_symlinks: false,
        }
    }

    /// Build a discovery engine from the `files` configuration section
    pub fn from_config(config: &FileConfig) -> Result<Self> {
        Ok(Self::new()
            .with_extensions(config.extensions.clone())
            .with_include_patterns(config.include_patterns.clone())?
            .with_exclude_patterns(config.exclude_patterns.clone())?
            .with_max_depth(config.max_depth)
            .with_follow_symlinks(config.follow_symlinks))
    }

    /// Set file extensions to discover; matching ignores case
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Result<Self> {
        self.include_set = build_glob_set(&patterns, "include")?;
        Ok(self)
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Result<Self> {
        self.exclude_set = build_glob_set(&patterns, "exclude")?;
        Ok(self)
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Discover files in the given path (file or directory).
    ///
    /// A file named directly is always returned; filters only apply to
    /// directory contents. Results are sorted by path.
    pub fn discover_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(path)?;
        if metadata.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut walker = WalkBuilder::new(path);
        walker
            .standard_filters(false)
            .follow_links(self.follow_symlinks)
            // Files directly inside the root sit at walker depth 1
            .max_depth(self.max_depth.map(|depth| depth + 1));

        let mut files = Vec::new();
        for entry in walker.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error while walking {}: {}", path.display(), e);
                    continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && self.should_process(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Discovered {} files in {}", files.len(), path.display());
        Ok(files)
    }

    /// Discover files in every root, keeping the order of the roots
    pub fn discover_all(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in paths {
            files.extend(self.discover_files(path)?);
        }
        Ok(files)
    }

    /// Check if a file should be processed based on extensions and patterns
    pub fn should_process(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        if !self.extensions.contains(&extension.to_lowercase()) {
            return false;
        }

        if let Some(exclude_set) = &self.exclude_set
            && exclude_set.is_match(path)
        {
            return false;
        }

        // If include patterns are given, at least one must match
        if let Some(include_set) = &self.include_set {
            return include_set.is_match(path);
        }

        true
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

fn build_glob_set(patterns: &[String], kind: &str) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = globset::GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                ConfigError::Validation(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
        builder.add(glob);
    }

    let set = builder.build().map_err(|e| {
        ConfigError::Validation(format!("Failed to build {} glob set: {}", kind, e))
    })?;
    Ok(Some(set))
}
