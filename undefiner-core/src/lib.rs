//! undefiner-core: dead preprocessor define detection.
//!
//! Scans a source tree for `#define NAME` directives and reports every name
//! that is never mentioned anywhere else in the tree.
//!
//! Detection is a conservative textual heuristic, not a preprocessor: there
//! is no macro expansion and no `#if` evaluation, so a mention inside
//! `#if 0`, a comment or a string literal still counts as a use.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use undefiner_core::prelude::*;
//!
//! let result = Undefiner::new("/path/to/src")
//!     .exclude_defines(["gen_*.h"])
//!     .analyze()?;
//!
//! for u in &result.unused {
//!     println!("{}", format_line(u));
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`classify`]: Line classifier (define and use matching)
//! - [`file_scan`]: Per-file define table and use set extraction
//! - [`walk`]: Candidate file discovery with hidden-directory pruning
//! - [`scheduler`]: Bounded parallel scanning feeding a single aggregator
//! - [`aggregate`]: Global define table and use set
//! - [`report`]: Unused-define computation and output
//! - [`builder`]: Fluent builder API
//! - [`config`]: Scan configuration and exclusion policy
//! - [`error`]: Typed error handling

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod file_scan;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scheduler;
pub mod walk;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{IoResultExt, UndefinerError, UndefinerResult};

// Builder API
pub use builder::{AnalysisResult, Undefiner};

// Configuration
pub use config::{ExclusionPolicy, ScanConfig, DEFAULT_EXTENSIONS, DEFAULT_MAX_IN_FLIGHT};

// Line classification
pub use classify::{DefineMatch, DirectiveClassifier, LineClassifier};

// File scanning
pub use file_scan::{scan_file, scan_reader, DefineTable, FileFacts, Location, UseSet};

// Tree walking
pub use walk::{walk_candidates, Candidate};

// Scheduling and aggregation
pub use aggregate::{Aggregator, ScanStats};
pub use scheduler::{run_scan, run_scan_with, FileScanner, ScanOutput};

// Logging
pub use logging::init_logging;

// Reporting
pub use report::{find_unused, format_line, write_json, write_plain, UnusedDefine};
