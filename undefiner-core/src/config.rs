//! Scan configuration and the define-exclusion policy.
//!
//! All configuration comes from the command line; there is no config file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{UndefinerError, UndefinerResult};

/// Source and header extensions scanned by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".c", ".h"];

/// Default cap on concurrently running file scans.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Settings for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to walk
    pub root: PathBuf,
    /// Base-name suffixes that select candidate files
    pub extensions: Vec<String>,
    /// Glob patterns; matching files contribute uses but no definitions
    pub exclude_defines: Vec<String>,
    /// Maximum number of file scans in flight at once
    pub max_in_flight: usize,
}

impl ScanConfig {
    /// Create a config for `root` with default extensions and admission cap.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_defines: Vec::new(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Check the settings before any work starts.
    pub fn validate(&self) -> UndefinerResult<()> {
        if self.max_in_flight == 0 {
            return Err(UndefinerError::invalid_argument(
                "max_in_flight must be at least 1",
            ));
        }
        if self.extensions.is_empty() || self.extensions.iter().any(|e| e.is_empty()) {
            return Err(UndefinerError::invalid_argument(
                "at least one non-empty file extension is required",
            ));
        }
        if !self.root.is_dir() {
            return Err(UndefinerError::invalid_argument(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// Whether a file base name ends in one of the configured extensions.
    pub fn has_candidate_extension(&self, base_name: &OsStr) -> bool {
        let bytes = base_name.as_encoded_bytes();
        self.extensions
            .iter()
            .any(|ext| bytes.ends_with(ext.as_bytes()))
    }
}

/// Compiled set of base-name globs whose files contribute no definitions.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    globs: GlobSet,
    len: usize,
}

impl ExclusionPolicy {
    /// Compile `patterns`. A malformed pattern is fatal.
    pub fn new(patterns: &[String]) -> UndefinerResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| UndefinerError::pattern(pattern, e))?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| UndefinerError::pattern(patterns.join(","), e))?;

        Ok(Self {
            globs,
            len: patterns.len(),
        })
    }

    /// A policy that excludes nothing.
    pub fn empty() -> Self {
        Self {
            globs: GlobSet::empty(),
            len: 0,
        }
    }

    /// Whether `path`'s base name matches any pattern.
    pub fn excludes(&self, path: &Path) -> bool {
        if self.len == 0 {
            return false;
        }
        path.file_name().is_some_and(|name| self.globs.is_match(name))
    }

    /// Number of configured patterns.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
