//! Table listing and creation commands.

use super::Format;
use cryptkv_core::EncryptedStore;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

#[derive(Serialize)]
struct KeyListing<'a> {
    table: &'a str,
    count: usize,
    keys: Vec<String>,
}

/// Prints every table name.
pub fn list(
    store: &EncryptedStore,
    format: Format,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let tables = store.tables()?;
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&tables)?)?,
        Format::Text => {
            for table in tables {
                writeln!(out, "{table}")?;
            }
        }
    }
    Ok(())
}

/// Prints every key of `table`.
pub fn keys(
    store: &EncryptedStore,
    table: &str,
    format: Format,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let keys = store.keys(table)?;
    match format {
        Format::Json => {
            let listing = KeyListing {
                table,
                count: keys.len(),
                keys,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        }
        Format::Text => {
            for key in keys {
                writeln!(out, "{key}")?;
            }
        }
    }
    Ok(())
}

/// Creates `name` if it does not exist.
pub fn create(store: &EncryptedStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    debug!(table = name, "creating table");
    store.create_table(name)?;
    Ok(())
}
