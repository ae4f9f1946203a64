//! Builder pattern API for dead define analysis.
//!
//! Provides a fluent interface over the scan pipeline:
//!
//! ```rust,ignore
//! use undefiner_core::prelude::*;
//!
//! let result = Undefiner::new("/path/to/tree")
//!     .exclude_defines(["gen_*.h"])
//!     .max_in_flight(8)
//!     .analyze()?;
//!
//! for u in &result.unused {
//!     println!("{}", format_line(u));
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregate::ScanStats;
use crate::classify::{DirectiveClassifier, LineClassifier};
use crate::config::ScanConfig;
use crate::error::UndefinerResult;
use crate::report::{find_unused, UnusedDefine};
use crate::file_scan::scan_file;
use crate::scheduler::{run_scan_with, FileScanner};

/// Builder for configuring dead define analysis.
#[derive(Clone)]
pub struct Undefiner {
    config: ScanConfig,

    /// Custom line classifier; `None` uses [`DirectiveClassifier`]
    classifier: Option<Arc<dyn LineClassifier>>,

    /// Custom per-file scanner; `None` reads files with [`scan_file`]
    file_scanner: Option<Arc<FileScanner>>,
}

impl std::fmt::Debug for Undefiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Undefiner")
            .field("config", &self.config)
            .field("custom_classifier", &self.classifier.is_some())
            .field("custom_file_scanner", &self.file_scanner.is_some())
            .finish()
    }
}

/// Result of a complete analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Unused defines, sorted by symbol
    pub unused: Vec<UnusedDefine>,
    /// Run counters
    pub stats: ScanStats,
}

impl Undefiner {
    /// Create a new analysis builder for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: ScanConfig::new(root),
            classifier: None,
            file_scanner: None,
        }
    }

    /// Replace the candidate file extensions.
    pub fn extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    /// Add base-name globs whose files contribute uses but no definitions.
    pub fn exclude_defines(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.config
            .exclude_defines
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Cap the number of concurrent file scans.
    pub fn max_in_flight(mut self, n: usize) -> Self {
        self.config.max_in_flight = n;
        self
    }

    /// Use a custom line classifier.
    pub fn classifier(mut self, classifier: Arc<dyn LineClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Use a custom per-file scanner in place of reading from disk.
    pub fn file_scanner(mut self, scanner: Arc<FileScanner>) -> Self {
        self.file_scanner = Some(scanner);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> UndefinerResult<AnalysisResult> {
        let scanner: &FileScanner = match &self.file_scanner {
            Some(s) => &**s,
            None => &scan_file,
        };
        let output = match &self.classifier {
            Some(c) => run_scan_with(&self.config, c.as_ref(), scanner)?,
            None => run_scan_with(&self.config, &DirectiveClassifier::new()?, scanner)?,
        };

        let unused = find_unused(&output.state);
        Ok(AnalysisResult {
            unused,
            stats: output.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let b = Undefiner::new("/src");
        assert_eq!(b.config().extensions, vec![".c", ".h"]);
        assert_eq!(b.config().max_in_flight, 16);
        assert!(b.config().exclude_defines.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let b = Undefiner::new("/src")
            .extensions([".inc"])
            .exclude_defines(["gen_*.h"])
            .exclude_defines(["*_autogen.h"])
            .max_in_flight(4);
        assert_eq!(b.config().extensions, vec![".inc"]);
        assert_eq!(b.config().exclude_defines, vec!["gen_*.h", "*_autogen.h"]);
        assert_eq!(b.config().max_in_flight, 4);
    }

    #[test]
    fn test_file_scanner_hook_is_used() {
        use crate::error::{UndefinerError, UndefinerResult};
        use crate::file_scan::FileFacts;
        use std::path::Path;

        let root = std::env::temp_dir()
            .join("undefiner_builder_test")
            .join(format!("hook_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.h"), "#define REAL 1\n").unwrap();

        let refuse = |path: &Path, _: &dyn LineClassifier| -> UndefinerResult<FileFacts> {
            Err(UndefinerError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "refused"),
            ))
        };
        let err = Undefiner::new(&root)
            .file_scanner(Arc::new(refuse))
            .analyze()
            .unwrap_err();
        assert_eq!(err.path(), Some(&root.join("a.h")));
        std::fs::remove_dir_all(&root).ok();
    }
}
