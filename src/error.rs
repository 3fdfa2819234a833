use std::io;
use std::path::Path;

use thiserror::Error;

/// Failure classes for file operations, each carrying the path involved.
///
/// Callers get a concrete cause instead of a collapsed "could not read"
/// diagnostic, so they can decide between recovery and termination.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("invalid UTF-8 in {path}")]
    InvalidUtf8 { path: String },

    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify an `io::Error` against the path that produced it.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::Io { path, source: err },
        }
    }

    /// The path (or glob pattern) the failing operation was given.
    pub fn path(&self) -> &str {
        match self {
            FileError::NotFound { path }
            | FileError::PermissionDenied { path }
            | FileError::InvalidUtf8 { path }
            | FileError::Io { path, .. } => path,
            FileError::Pattern { pattern, .. } => pattern,
        }
    }
}
