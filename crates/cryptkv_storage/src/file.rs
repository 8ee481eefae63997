//! File-based storage backend for persistent storage.

use crate::backend::{check_bucket_name, check_key, StorageBackend};
use crate::error::{StorageError, StorageResult};
use crate::paths;
use redb::{Database, ReadableTable, TableDefinition, TableHandle, WriteTransaction};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default time to wait for the engine's own file lock.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(1);

/// Bucket schema: UTF-8 keys to opaque bytes.
type Bucket<'a> = TableDefinition<'a, &'static str, &'static [u8]>;

fn bucket(name: &str) -> Bucket<'_> {
    TableDefinition::new(name)
}

/// Options for [`FileBackend::open_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// How long to retry while another handle holds the database file.
    pub open_timeout: Duration,
    /// Sleep between open attempts.
    pub poll_interval: Duration,
    /// Create missing parent directories.
    pub create_dirs: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            poll_interval: Duration::from_millis(10),
            create_dirs: false,
        }
    }
}

/// A durable single-file backend built on redb.
///
/// Each bucket is a redb table. Reads run in MVCC read transactions and
/// see a consistent snapshot; writes are serialized by the engine's single
/// write transaction and are durable once they return.
///
/// # Example
///
/// ```no_run
/// use cryptkv_storage::{FileBackend, StorageBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("app")).unwrap();
/// backend.create_bucket("users").unwrap();
/// backend.put("users", "alice", b"raw bytes").unwrap();
/// assert_eq!(backend.get("users", "alice").unwrap().as_deref(), Some(&b"raw bytes"[..]));
/// ```
pub struct FileBackend {
    path: PathBuf,
    db: Database,
}

impl FileBackend {
    /// Opens or creates the database file for `path` with default options.
    ///
    /// The `.db` suffix is appended when missing.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::open_with_options(path, FileOptions::default())
    }

    /// Opens or creates the database file for `path`.
    ///
    /// # Errors
    ///
    /// Returns an engine error if another handle still holds the file after
    /// `options.open_timeout`, or if the file is not a valid database.
    pub fn open_with_options(path: &Path, options: FileOptions) -> StorageResult<Self> {
        let path = paths::db_path(path);

        if options.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }
        create_private_file(&path)?;

        let started = Instant::now();
        let db = loop {
            match Database::create(&path) {
                Ok(db) => break db,
                Err(redb::DatabaseError::DatabaseAlreadyOpen)
                    if started.elapsed() < options.open_timeout =>
                {
                    thread::sleep(options.poll_interval);
                }
                Err(err) => return Err(err.into()),
            }
        };

        debug!(path = %path.display(), "opened storage engine");
        Ok(Self { path, db })
    }

    /// Runs `f` in a write transaction, committing on success and aborting
    /// on error.
    fn update<T>(
        &self,
        f: impl FnOnce(&WriteTransaction) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let txn = self.db.begin_write()?;
        match f(&txn) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort) = txn.abort() {
                    warn!(path = %self.path.display(), error = %abort, "failed to abort transaction");
                }
                Err(err)
            }
        }
    }
}

/// Fails with `BucketNotFound` unless `name` exists in the transaction.
fn require_bucket(txn: &WriteTransaction, name: &str) -> StorageResult<()> {
    if txn.list_tables()?.any(|table| table.name() == name) {
        Ok(())
    } else {
        Err(StorageError::bucket_not_found(name))
    }
}

/// Creates an empty database file readable only by the owner.
fn create_private_file(path: &Path) -> StorageResult<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    match options.open(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err.into()),
    }
}

impl StorageBackend for FileBackend {
    fn create_bucket(&self, name: &str) -> StorageResult<()> {
        check_bucket_name(name)?;
        self.update(|txn| {
            txn.open_table(bucket(name))?;
            Ok(())
        })?;
        debug!(bucket = name, "created bucket");
        Ok(())
    }

    fn get(&self, name: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(bucket(name))?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn put(&self, name: &str, key: &str, value: &[u8]) -> StorageResult<()> {
        check_key(key)?;
        self.update(|txn| {
            require_bucket(txn, name)?;
            let mut table = txn.open_table(bucket(name))?;
            table.insert(key, value)?;
            Ok(())
        })
    }

    fn delete(&self, name: &str, key: &str) -> StorageResult<()> {
        self.update(|txn| {
            require_bucket(txn, name)?;
            let mut table = txn.open_table(bucket(name))?;
            table.remove(key)?;
            Ok(())
        })
    }

    fn keys(&self, name: &str) -> StorageResult<Vec<String>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(bucket(name))?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }

    fn buckets(&self) -> StorageResult<Vec<String>> {
        let txn = self.db.begin_read()?;
        let names = txn
            .list_tables()?
            .map(|table| table.name().to_string())
            .collect();
        Ok(names)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

impl std::fmt::Debug for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
