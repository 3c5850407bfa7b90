//! Error types for scanning and aggregation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while walking, counting, or aggregating.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory traversal could not enter or read an entry.
    #[error("Walk error at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Opening or reading a text file for line counting failed.
    #[error("Line count failed for {path}: {source}")]
    LineCount {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key was routed to a summary built for the other grouping mode.
    #[error("Group key does not match the summary's grouping mode")]
    GroupingMismatch,

    /// Too many files failed.
    #[error("Too many errors ({count}), aborting")]
    TooManyErrors { count: u64 },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a line-count error with path context.
    pub fn line_count(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LineCount {
            path: path.into(),
            source,
        }
    }

    /// Whether this error stops the walk rather than a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::LineCount { .. })
    }
}
