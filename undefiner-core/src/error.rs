//! Typed error handling for undefiner.
//!
//! Every fault in a scan is either tolerated (skipped walk entries) or fatal.
//! Fatal faults surface as an [`UndefinerError`] so callers can match on the
//! category and report the offending path or pattern.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for undefiner operations.
#[derive(Error, Debug)]
pub enum UndefinerError {
    /// I/O error when opening or reading a source file
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A glob or regex pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error (thread pool, worker panics)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl UndefinerError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for undefiner results.
pub type UndefinerResult<T> = Result<T, UndefinerError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> UndefinerResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> UndefinerResult<T> {
        self.map_err(|e| UndefinerError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = UndefinerError::io(
            PathBuf::from("/src/config.h"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, UndefinerError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/src/config.h")));
        assert!(err.to_string().contains("/src/config.h"));
    }

    #[test]
    fn test_pattern_error_message() {
        let err = UndefinerError::pattern("gen_[.h", "unclosed character class");
        assert_eq!(
            err.to_string(),
            "Invalid pattern 'gen_[.h': unclosed character class"
        );
        assert!(err.path().is_none());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let err = result.with_path("/locked/file.c").unwrap_err();
        assert_eq!(err.path(), Some(&PathBuf::from("/locked/file.c")));
    }
}
