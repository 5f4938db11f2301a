//! Error types for cfgrepo-core

/// Result type for configuration repository operations
pub type Result<T> = std::result::Result<T, Error>;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when working with configuration repositories
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named version does not exist where one was required
    #[error("Unknown version '{name}'")]
    UnknownVersion { name: String },

    /// An empty or ill-formed path, repository name, or version name
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A resource path resolves outside the repository root
    #[error("Path '{path}' escapes the repository root")]
    PathViolation { path: String },

    /// A version name is already taken
    #[error("Version '{name}' already exists")]
    DuplicateVersion { name: String },

    /// Tag attempted on a session with no commits
    #[error("Cannot tag: the session has no commits")]
    EmptySession,

    /// History operation requested on a backend without history support.
    ///
    /// This signals a programming misuse, not a recoverable condition:
    /// callers must consult `supports_history()` before using undo/redo
    /// or the reset operations.
    #[error("Operation '{operation}' requires a backend with history support")]
    HistoryUnsupported { operation: &'static str },

    /// Underlying storage I/O failed; the cause is surfaced unchanged
    #[error("Storage failure: {source}")]
    Storage {
        #[source]
        source: BoxedCause,
    },
}

impl Error {
    /// Wrap an underlying storage or engine failure.
    pub fn storage(source: impl Into<BoxedCause>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<cfgrepo_fs::Error> for Error {
    fn from(err: cfgrepo_fs::Error) -> Self {
        match err {
            cfgrepo_fs::Error::PathEscape { path } => Error::PathViolation { path },
            cfgrepo_fs::Error::InvalidIdentifier { name, reason } => Error::InvalidArgument {
                message: format!("invalid name '{name}': {reason}"),
            },
            other => Error::storage(other),
        }
    }
}
