//! Error types for cryptkv core.

use cryptkv_codec::CodecError;
use cryptkv_storage::StorageError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Operation attempted before open or after close.
    #[error("database not opened")]
    NotOpened,

    /// The table does not exist.
    #[error("bucket not found: {name}")]
    BucketNotFound {
        /// Name of the missing table.
        name: String,
    },

    /// The key has no stored value.
    #[error("not found: {key} in {table}")]
    NotFound {
        /// The table searched.
        table: String,
        /// The key that was not found.
        key: String,
    },

    /// The stored value could not be decrypted or is not text.
    ///
    /// Signals a wrong passphrase or corrupted data.
    #[error("failed to decode value: {source}")]
    Decode {
        /// The underlying codec failure.
        source: CodecError,
    },

    /// The value could not be encrypted or compressed.
    #[error("failed to encode value: {source}")]
    Encode {
        /// The underlying codec failure.
        source: CodecError,
    },

    /// The storage engine failed (I/O fault, corrupted file, ...).
    #[error("engine error: {0}")]
    Engine(StorageError),

    /// The cross-process lock could not be acquired in time.
    #[error("timed out after {timeout:?} waiting for lock {}", path.display())]
    LockTimeout {
        /// The lock file path.
        path: PathBuf,
        /// How long acquisition was attempted.
        timeout: Duration,
    },

    /// An argument was rejected before touching storage.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates a bucket not found error.
    pub fn bucket_not_found(name: impl Into<String>) -> Self {
        Self::BucketNotFound { name: name.into() }
    }

    /// Creates a not found error.
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wraps a codec failure on the read path.
    pub fn decode(source: CodecError) -> Self {
        match source {
            CodecError::EmptyPassphrase => Self::invalid_argument(source.to_string()),
            source => Self::Decode { source },
        }
    }

    /// Wraps a codec failure on the write path.
    pub fn encode(source: CodecError) -> Self {
        match source {
            CodecError::EmptyPassphrase => Self::invalid_argument(source.to_string()),
            source => Self::Encode { source },
        }
    }

    /// Returns true for errors that mean "nothing stored here".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::BucketNotFound { name } => Self::BucketNotFound { name },
            StorageError::LockTimeout { path, timeout } => Self::LockTimeout { path, timeout },
            StorageError::InvalidName { message } => Self::InvalidArgument { message },
            other => Self::Engine(other),
        }
    }
}
