//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The storage engine reported an error.
    #[error("storage engine error: {0}")]
    Engine(#[from] redb::Error),

    /// The named bucket does not exist.
    #[error("bucket not found: {name}")]
    BucketNotFound {
        /// Name of the missing bucket.
        name: String,
    },

    /// A bucket or key name was rejected.
    #[error("invalid name: {message}")]
    InvalidName {
        /// Why the name was rejected.
        message: String,
    },

    /// The lock file could not be acquired in time.
    #[error("timed out after {timeout:?} waiting for lock {}", path.display())]
    LockTimeout {
        /// The lock file path.
        path: PathBuf,
        /// How long acquisition was attempted.
        timeout: Duration,
    },

    /// The lock file vanished or was replaced while held.
    #[error("lock file lost: {}", path.display())]
    LockLost {
        /// The lock file path.
        path: PathBuf,
    },
}

impl StorageError {
    /// Creates a bucket not found error.
    pub fn bucket_not_found(name: impl Into<String>) -> Self {
        Self::BucketNotFound { name: name.into() }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        match err {
            redb::TableError::TableDoesNotExist(name) => Self::BucketNotFound { name },
            other => Self::Engine(other.into()),
        }
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        Self::Engine(err.into())
    }
}
