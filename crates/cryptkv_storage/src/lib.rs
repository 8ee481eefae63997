//! # cryptkv Storage
//!
//! Storage backends and lock files for cryptkv.
//!
//! This crate provides the lowest-level storage abstraction for cryptkv.
//! Storage backends are **opaque bucket stores** - they map string keys to
//! raw bytes inside named buckets and never interpret the bytes.
//!
//! ## Design Principles
//!
//! - One engine transaction per operation, committed or rolled back in full
//! - No knowledge of the value pipeline (compression, encryption)
//! - Must be `Send + Sync`; concurrency within a process is the engine's job
//! - Cross-process exclusion is a separate lock file ([`LockGuard`])
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - Durable single-file storage on redb
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//!
//! ## Example
//!
//! ```rust
//! use cryptkv_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.create_bucket("store").unwrap();
//! backend.put("store", "greeting", b"hello world").unwrap();
//! let data = backend.get("store", "greeting").unwrap();
//! assert_eq!(data.as_deref(), Some(&b"hello world"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod lock;
mod memory;
pub mod paths;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::{FileBackend, FileOptions, DEFAULT_OPEN_TIMEOUT};
pub use lock::{LockGuard, LockOptions, DEFAULT_LOCK_TIMEOUT, DEFAULT_POLL_INTERVAL};
pub use memory::InMemoryBackend;
