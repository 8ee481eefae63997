//! Value commands: get, set and remove.

use cryptkv_core::EncryptedStore;
use std::io::Write;
use tracing::debug;

/// Decrypts and prints the value under `key`.
pub fn get(
    store: &EncryptedStore,
    table: &str,
    key: &str,
    passphrase: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = store.get(table, key, passphrase)?;
    writeln!(out, "{value}")?;
    Ok(())
}

/// Encrypts and stores `value` under `key`.
pub fn set(
    store: &EncryptedStore,
    table: &str,
    key: &str,
    value: &str,
    passphrase: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(table, key, "setting value");
    store.set(table, key, value, passphrase)?;
    Ok(())
}

/// Deletes `key`.
pub fn remove(
    store: &EncryptedStore,
    table: &str,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(table, key, "removing value");
    store.remove(table, key)?;
    Ok(())
}
