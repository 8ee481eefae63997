//! The encrypted store facade.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use cryptkv_codec::{CompressionCodec, ValueCodec};
use cryptkv_storage::{paths, FileBackend, InMemoryBackend, LockGuard, StorageBackend};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// The main store handle.
///
/// `EncryptedStore` combines a cross-process lock file, a storage engine
/// connection and the value pipeline. Values are encrypted with a
/// caller-supplied passphrase and compressed before they reach the engine,
/// and go through the reverse on the way out.
///
/// # Lifecycle
///
/// A store is either open or closed. [`open`](Self::open) acquires the
/// lock file, opens the engine and creates the default table; the lock is
/// held until [`close`](Self::close) or drop. Every data operation on a
/// closed store fails with [`CoreError::NotOpened`].
///
/// ```rust,no_run
/// use cryptkv_core::EncryptedStore;
///
/// let mut store = EncryptedStore::open("app")?; // app.db + app.lock
/// store.create_table("users")?;
/// store.set("users", "alice", "secret-token", "pw123")?;
/// assert_eq!(store.get("users", "alice", "pw123")?, "secret-token");
/// store.close()?; // removes app.lock
/// # Ok::<(), cryptkv_core::CoreError>(())
/// ```
///
/// # Concurrency
///
/// Data operations take `&self` and each runs in its own engine
/// transaction, so one store can be shared between threads. A second
/// store (in this or another process) opening the same path blocks on the
/// lock file until the first one closes or the lock timeout elapses.
pub struct EncryptedStore {
    config: Config,
    codec: ValueCodec,
    state: StoreState,
}

enum StoreState {
    Closed,
    Open(OpenStore),
}

struct OpenStore {
    // Dropped before `lock`: the engine closes before the lock file goes.
    backend: Box<dyn StorageBackend>,
    lock: Option<LockGuard>,
}

impl EncryptedStore {
    /// Creates a closed store with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let codec = ValueCodec::new(CompressionCodec::new(config.compression_level));
        Self {
            config,
            codec,
            state: StoreState::Closed,
        }
    }

    /// Opens (or creates) the store at `path` with the default configuration.
    ///
    /// `.db` is appended to `path` when missing; the lock file is the same
    /// path with a `.lock` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LockTimeout`] if another handle keeps the lock
    /// for longer than the lock timeout, or [`CoreError::Engine`] if the
    /// database file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens (or creates) the store at `path` with custom configuration.
    ///
    /// ```rust,no_run
    /// use cryptkv_core::{Config, EncryptedStore};
    /// use std::time::Duration;
    ///
    /// let config = Config::default().lock_timeout(Duration::from_secs(5));
    /// let store = EncryptedStore::open_with_config("app", config)?;
    /// # Ok::<(), cryptkv_core::CoreError>(())
    /// ```
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> CoreResult<Self> {
        let mut store = Self::new(config);
        store.open_at(path)?;
        Ok(store)
    }

    /// Opens a non-persistent store for testing.
    ///
    /// No file or lock is involved; data is lost on close.
    pub fn open_in_memory() -> CoreResult<Self> {
        let mut store = Self::new(Config::default());
        let backend = InMemoryBackend::new();
        backend.create_bucket(&store.config.default_table)?;
        store.state = StoreState::Open(OpenStore {
            backend: Box::new(backend),
            lock: None,
        });
        Ok(store)
    }

    /// Opens this store at `path`, closing the current database first if
    /// one is open.
    pub fn open_at(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        if self.is_open() {
            warn!("store already open, closing before reopening");
            self.close()?;
        }

        let db_path = paths::db_path(path.as_ref());
        // The lock file lives next to the database and is created first.
        if self.config.create_dirs {
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| CoreError::Engine(e.into()))?;
            }
        }

        // On any error below the guard drops and the lock file is released.
        let lock = LockGuard::for_database(&db_path, self.config.lock_options())?;
        let backend = FileBackend::open_with_options(&db_path, self.config.file_options())?;
        backend.create_bucket(&self.config.default_table)?;

        info!(path = %db_path.display(), "opened store");
        self.state = StoreState::Open(OpenStore {
            backend: Box::new(backend),
            lock: Some(lock),
        });
        Ok(())
    }

    /// Closes the engine and releases the lock file.
    ///
    /// Closing a closed store does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file could not be released cleanly. The
    /// store is closed either way.
    pub fn close(&mut self) -> CoreResult<()> {
        let StoreState::Open(open) = std::mem::replace(&mut self.state, StoreState::Closed) else {
            return Ok(());
        };

        let OpenStore { backend, lock } = open;
        let path = backend.path().map(Path::to_path_buf);
        drop(backend);
        if let Some(lock) = lock {
            lock.release()?;
        }

        match path {
            Some(path) => info!(path = %path.display(), "closed store"),
            None => info!("closed in-memory store"),
        }
        Ok(())
    }

    /// Returns true while the store is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, StoreState::Open(_))
    }

    /// Returns the database file path of an open, file-backed store.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            StoreState::Open(open) => open.backend.path(),
            StoreState::Closed => None,
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn backend(&self) -> CoreResult<&dyn StorageBackend> {
        match &self.state {
            StoreState::Open(open) => Ok(open.backend.as_ref()),
            StoreState::Closed => Err(CoreError::NotOpened),
        }
    }

    /// Creates a table if it does not exist yet.
    pub fn create_table(&self, name: &str) -> CoreResult<()> {
        self.backend()?.create_bucket(name)?;
        debug!(table = name, "created table");
        Ok(())
    }

    /// Encrypts `value` with `passphrase`, compresses it and stores it under
    /// `key` in `table`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotOpened`] if the store is closed
    /// - [`CoreError::BucketNotFound`] if the table does not exist
    /// - [`CoreError::InvalidArgument`] for an empty key or passphrase
    /// - [`CoreError::Encode`] if encryption fails
    pub fn set(&self, table: &str, key: &str, value: &str, passphrase: &str) -> CoreResult<()> {
        let backend = self.backend()?;
        let stored = self
            .codec
            .encode(value, passphrase)
            .map_err(CoreError::encode)?;
        backend.put(table, key, &stored)?;
        Ok(())
    }

    /// Reads the value under `key` in `table` and decrypts it with
    /// `passphrase`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotOpened`] if the store is closed
    /// - [`CoreError::BucketNotFound`] if the table does not exist
    /// - [`CoreError::NotFound`] if nothing is stored under `key`
    /// - [`CoreError::Decode`] for a wrong passphrase or corrupted data
    pub fn get(&self, table: &str, key: &str, passphrase: &str) -> CoreResult<String> {
        let stored = self
            .backend()?
            .get(table, key)?
            .ok_or_else(|| CoreError::not_found(table, key))?;

        self.codec
            .decode(&stored, passphrase)
            .map_err(CoreError::decode)?
            .ok_or_else(|| CoreError::not_found(table, key))
    }

    /// Returns true if `key` has a stored value in `table`.
    ///
    /// The value is not decrypted, so no passphrase is needed.
    pub fn contains(&self, table: &str, key: &str) -> CoreResult<bool> {
        Ok(self.backend()?.get(table, key)?.is_some())
    }

    /// Deletes `key` from `table`. Removing an absent key succeeds.
    pub fn remove(&self, table: &str, key: &str) -> CoreResult<()> {
        self.backend()?.delete(table, key)?;
        Ok(())
    }

    /// Returns every key in `table`, in byte order.
    pub fn keys(&self, table: &str) -> CoreResult<Vec<String>> {
        Ok(self.backend()?.keys(table)?)
    }

    /// Returns the names of all tables, in byte order.
    pub fn tables(&self) -> CoreResult<Vec<String>> {
        Ok(self.backend()?.buckets()?)
    }
}

impl Drop for EncryptedStore {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(error = %err, "failed to close store");
        }
    }
}

impl std::fmt::Debug for EncryptedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedStore")
            .field("open", &self.is_open())
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}
