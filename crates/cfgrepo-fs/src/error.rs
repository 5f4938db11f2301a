//! Error types for cfgrepo-fs

use std::path::PathBuf;

/// Result type for cfgrepo-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cfgrepo-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path '{path}' escapes the repository root")]
    PathEscape { path: String },

    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
