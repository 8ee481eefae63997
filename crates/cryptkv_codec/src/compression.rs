//! Gzip compression for stored values.

use crate::error::{CodecError, CodecResult};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Default gzip level (flate2's default).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Reversible byte compressor.
///
/// The codec is stateless apart from its level; `decompress(compress(x))`
/// returns `x` for every input, and `decompress(&[])` returns an empty
/// vector so that a missing value decodes to "nothing".
///
/// # Example
///
/// ```rust
/// use cryptkv_codec::CompressionCodec;
///
/// let codec = CompressionCodec::default();
/// let packed = codec.compress(b"aaaaaaaaaaaaaaaa").unwrap();
/// assert_eq!(codec.decompress(&packed).unwrap(), b"aaaaaaaaaaaaaaaa");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompressionCodec {
    level: Compression,
}

impl CompressionCodec {
    /// Creates a codec with the given gzip level (0-9, clamped).
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }

    /// Returns the configured gzip level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level.level()
    }

    /// Compresses `data` into a gzip stream.
    pub fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), self.level);
        encoder
            .write_all(data)
            .map_err(|e| CodecError::compression(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| CodecError::compression(e.to_string()))
    }

    /// Decompresses a gzip stream produced by [`compress`](Self::compress).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decompression`] if `data` is not a valid
    /// gzip stream.
    pub fn decompress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::with_capacity(data.len() * 2);
        decoder
            .read_to_end(&mut out)
            .map_err(|e| CodecError::decompression(e.to_string()))?;
        Ok(out)
    }
}

impl Default for CompressionCodec {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}
