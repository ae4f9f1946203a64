//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use undefiner_core::prelude::*;
//! ```

// Builder API
pub use crate::builder::{AnalysisResult, Undefiner};

// Errors
pub use crate::error::{UndefinerError, UndefinerResult};

// Configuration
pub use crate::config::{ExclusionPolicy, ScanConfig};

// Line classification
pub use crate::classify::{DefineMatch, DirectiveClassifier, LineClassifier};

// Reporting
pub use crate::report::{find_unused, format_line, UnusedDefine};
