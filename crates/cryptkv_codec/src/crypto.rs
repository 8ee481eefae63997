//! Passphrase encryption using AES-256-GCM.
//!
//! ## Security Model
//!
//! - Uses AES-256-GCM for authenticated encryption, so a wrong passphrase
//!   fails on the authentication tag instead of yielding garbage
//! - Every encryption draws a fresh salt and nonce
//! - Keys are derived from the passphrase with HKDF-SHA256 and zeroized on drop
//! - The passphrase itself is never stored
//!
//! ## Ciphertext Format
//!
//! The ciphertext is a standard base64 string over:
//!
//! ```text
//! version (1) || salt (16) || nonce (12) || ciphertext || tag (16)
//! ```

use crate::error::{CodecError, CodecResult};
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;
/// Size of the per-value key derivation salt in bytes.
pub const SALT_SIZE: usize = 16;
/// Current ciphertext format version.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_SIZE: usize = 1 + SALT_SIZE + NONCE_SIZE;
const KDF_INFO: &[u8] = b"cryptkv-value-key-v1";

/// Key derived from a passphrase.
///
/// The key is automatically zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PassphraseKey {
    bytes: [u8; KEY_SIZE],
}

impl PassphraseKey {
    /// Derives a key from a passphrase using HKDF-SHA256.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyPassphrase`] for an empty passphrase.
    pub fn derive(passphrase: &str, salt: &[u8]) -> CodecResult<Self> {
        use hkdf::Hkdf;
        use sha2::Sha256;

        if passphrase.is_empty() {
            return Err(CodecError::EmptyPassphrase);
        }

        let hk = Hkdf::<Sha256>::new(Some(salt), passphrase.as_bytes());
        let mut bytes = [0u8; KEY_SIZE];
        hk.expand(KDF_INFO, &mut bytes)
            .map_err(|_| CodecError::key_derivation("HKDF expand failed"))?;

        Ok(Self { bytes })
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(GenericArray::from_slice(&self.bytes))
    }
}

impl std::fmt::Debug for PassphraseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Passphrase-keyed string cipher.
///
/// Stateless: every call derives its key from the passphrase and the salt
/// carried in the ciphertext.
///
/// # Example
///
/// ```rust
/// use cryptkv_codec::CryptoCodec;
///
/// let sealed = CryptoCodec::encrypt("pw123", "secret-token").unwrap();
/// assert_eq!(CryptoCodec::decrypt("pw123", &sealed).unwrap(), "secret-token");
/// assert!(CryptoCodec::decrypt("wrongpw", &sealed).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoCodec;

impl CryptoCodec {
    /// Encrypts `plaintext` with a key derived from `passphrase`.
    ///
    /// Returns the base64 ciphertext string.
    pub fn encrypt(passphrase: &str, plaintext: &str) -> CodecResult<String> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut salt);
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce_bytes);

        let key = PassphraseKey::derive(passphrase, &salt)?;
        let sealed = key
            .cipher()
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| CodecError::encryption_failed("encryption error"))?;

        let mut out = Vec::with_capacity(HEADER_SIZE + sealed.len());
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce_bytes);
        out.extend(sealed);

        Ok(STANDARD.encode(out))
    }

    /// Decrypts a ciphertext string produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecryptionFailed`] for a wrong passphrase or
    /// corrupted ciphertext, and [`CodecError::InvalidUtf8`] if the
    /// authenticated payload is not text.
    pub fn decrypt(passphrase: &str, ciphertext: &str) -> CodecResult<String> {
        let raw = STANDARD
            .decode(ciphertext)
            .map_err(|e| CodecError::decryption_failed(format!("invalid base64: {e}")))?;

        if raw.len() < HEADER_SIZE + TAG_SIZE {
            return Err(CodecError::decryption_failed("ciphertext too short"));
        }
        if raw[0] != FORMAT_VERSION {
            return Err(CodecError::decryption_failed(format!(
                "unsupported ciphertext version {}",
                raw[0]
            )));
        }

        let salt = &raw[1..1 + SALT_SIZE];
        let nonce = Nonce::from_slice(&raw[1 + SALT_SIZE..HEADER_SIZE]);
        let key = PassphraseKey::derive(passphrase, salt)?;

        let plaintext = key
            .cipher()
            .decrypt(nonce, &raw[HEADER_SIZE..])
            .map_err(|_| CodecError::decryption_failed("authentication failed"))?;

        String::from_utf8(plaintext).map_err(|_| CodecError::InvalidUtf8)
    }
}
