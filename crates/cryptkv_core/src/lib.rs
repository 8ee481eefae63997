//! # cryptkv Core
//!
//! Embedded key-value store with encryption and compression at rest.
//!
//! This crate provides:
//! - [`EncryptedStore`]: open/close lifecycle, tables, and passphrase
//!   protected `set`/`get`/`remove`/`keys`/`tables`
//! - Cross-process exclusion through a lock file held for the store's
//!   whole open lifetime
//! - A typed error taxonomy ([`CoreError`]) instead of process exits
//!
//! ## Example
//!
//! ```rust
//! use cryptkv_core::{CoreError, EncryptedStore};
//!
//! let store = EncryptedStore::open_in_memory()?;
//! store.create_table("users")?;
//! store.set("users", "alice", "secret-token", "pw123")?;
//!
//! assert_eq!(store.get("users", "alice", "pw123")?, "secret-token");
//! assert!(matches!(
//!     store.get("users", "alice", "wrongpw"),
//!     Err(CoreError::Decode { .. })
//! ));
//! # Ok::<(), CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod store;

pub use config::{Config, DEFAULT_TABLE};
pub use error::{CoreError, CoreResult};
pub use store::EncryptedStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
