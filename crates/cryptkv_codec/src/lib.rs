//! # cryptkv Codec
//!
//! Value pipeline for cryptkv.
//!
//! Every value written to a cryptkv store passes through two reversible
//! transforms:
//!
//! - [`CryptoCodec`]: AES-256-GCM keyed by a caller-supplied passphrase
//! - [`CompressionCodec`]: gzip over the resulting ciphertext string
//!
//! [`ValueCodec`] composes them in the fixed order the on-disk format
//! depends on: encrypt then compress on write, decompress then decrypt on
//! read.
//!
//! ## Usage
//!
//! ```
//! use cryptkv_codec::ValueCodec;
//!
//! let codec = ValueCodec::default();
//! let stored = codec.encode("secret-token", "pw123").unwrap();
//! let value = codec.decode(&stored, "pw123").unwrap();
//! assert_eq!(value.as_deref(), Some("secret-token"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod compression;
mod crypto;
mod error;
mod pipeline;

pub use compression::{CompressionCodec, DEFAULT_COMPRESSION_LEVEL};
pub use crypto::{
    CryptoCodec, PassphraseKey, FORMAT_VERSION, KEY_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};
pub use error::{CodecError, CodecResult};
pub use pipeline::ValueCodec;
