//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while compressing, encrypting or decoding values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The passphrase was empty.
    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    /// Failed to derive a key from the passphrase.
    #[error("key derivation failed: {message}")]
    KeyDerivation {
        /// Description of the derivation error.
        message: String,
    },

    /// Failed to encrypt a value.
    #[error("encryption failed: {message}")]
    EncryptionFailed {
        /// Description of the encryption error.
        message: String,
    },

    /// Failed to decrypt a value (wrong passphrase or corrupted data).
    #[error("decryption failed: {message}")]
    DecryptionFailed {
        /// Description of the decryption error.
        message: String,
    },

    /// Decrypted payload is not valid UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    /// Compressor failed.
    #[error("compression failed: {message}")]
    Compression {
        /// Description of the compressor error.
        message: String,
    },

    /// Stored bytes are not a valid compressed stream.
    #[error("decompression failed: {message}")]
    Decompression {
        /// Description of the decompressor error.
        message: String,
    },
}

impl CodecError {
    /// Create a key derivation error.
    pub fn key_derivation(message: impl Into<String>) -> Self {
        Self::KeyDerivation {
            message: message.into(),
        }
    }

    /// Create an encryption failed error.
    pub fn encryption_failed(message: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            message: message.into(),
        }
    }

    /// Create a decryption failed error.
    pub fn decryption_failed(message: impl Into<String>) -> Self {
        Self::DecryptionFailed {
            message: message.into(),
        }
    }

    /// Create a compression error.
    pub fn compression(message: impl Into<String>) -> Self {
        Self::Compression {
            message: message.into(),
        }
    }

    /// Create a decompression error.
    pub fn decompression(message: impl Into<String>) -> Self {
        Self::Decompression {
            message: message.into(),
        }
    }

    /// Returns true if this error means the stored value could not be
    /// decoded (wrong passphrase, tampering or corruption).
    #[must_use]
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed { .. } | Self::InvalidUtf8 | Self::Decompression { .. }
        )
    }
}
