//! Error types for session storage backends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a [`crate::SessionStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Persistent storage does not exist in this execution context.
    #[error("session storage is unavailable")]
    Unavailable,
    /// A file backed operation failed.
    #[error("session storage {operation} failed for {path}")]
    Io {
        /// Operation being attempted.
        operation: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The browser storage API rejected the call.
    #[error("session storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub(crate) const fn io(operation: &'static str, path: PathBuf, source: io::Error) -> Self {
        Self::Io {
            operation,
            path,
            source,
        }
    }
}
