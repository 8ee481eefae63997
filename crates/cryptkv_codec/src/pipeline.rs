//! The value pipeline applied to every stored value.
//!
//! Write path: `encrypt -> compress`. Read path: `decompress -> decrypt`.
//! The on-disk bytes of a value are therefore
//! `compress(encrypt(utf8(value), passphrase))`.

use crate::compression::CompressionCodec;
use crate::crypto::CryptoCodec;
use crate::error::{CodecError, CodecResult};

/// Encodes values for storage and decodes stored bytes back to values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCodec {
    compression: CompressionCodec,
}

impl ValueCodec {
    /// Creates a pipeline using the given compressor.
    #[must_use]
    pub fn new(compression: CompressionCodec) -> Self {
        Self { compression }
    }

    /// Returns the compressor used by this pipeline.
    #[must_use]
    pub fn compression(&self) -> &CompressionCodec {
        &self.compression
    }

    /// Encrypts `value` with `passphrase`, then compresses the ciphertext.
    pub fn encode(&self, value: &str, passphrase: &str) -> CodecResult<Vec<u8>> {
        let ciphertext = CryptoCodec::encrypt(passphrase, value)?;
        self.compression.compress(ciphertext.as_bytes())
    }

    /// Decompresses stored bytes, then decrypts them with `passphrase`.
    ///
    /// Returns `Ok(None)` when the decompressed payload is empty, which is
    /// how a missing value looks on the read path.
    pub fn decode(&self, stored: &[u8], passphrase: &str) -> CodecResult<Option<String>> {
        let decompressed = self.compression.decompress(stored)?;
        if decompressed.is_empty() {
            return Ok(None);
        }

        let ciphertext = String::from_utf8(decompressed)
            .map_err(|_| CodecError::decryption_failed("ciphertext is not text"))?;
        CryptoCodec::decrypt(passphrase, &ciphertext).map(Some)
    }
}
