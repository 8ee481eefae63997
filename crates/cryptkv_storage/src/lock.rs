//! Cross-process lock file.
//!
//! A [`LockGuard`] holds an advisory exclusive lock on `<base>.lock` for as
//! long as it lives. Only one guard per lock file can exist at a time,
//! whether the contenders are separate processes or separate handles in
//! the same process.
//!
//! The lock file is created on acquire and removed on release. Release
//! removes the file *before* unlocking it, so a waiter that wins the lock
//! on the unlinked file notices the path no longer names it and retries
//! on a fresh file.

use crate::error::{StorageError, StorageResult};
use crate::paths;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default interval between acquisition attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);
/// Default time to wait for the lock before giving up.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(60);

/// Polling parameters for [`LockGuard::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Sleep between attempts.
    pub poll_interval: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

/// An exclusive lock on a lock file, released on drop.
///
/// # Example
///
/// ```no_run
/// use cryptkv_storage::{LockGuard, LockOptions};
/// use std::path::Path;
///
/// let guard = LockGuard::for_database(Path::new("app"), LockOptions::default()).unwrap();
/// assert_eq!(guard.path(), Path::new("app.lock"));
/// guard.release().unwrap();
/// ```
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    file: Option<File>,
}

impl LockGuard {
    /// Acquires the lock file belonging to a database path.
    pub fn for_database(db_path: &Path, options: LockOptions) -> StorageResult<Self> {
        Self::acquire(&paths::lock_path(db_path), options)
    }

    /// Acquires an exclusive lock on `path`, creating the file if needed.
    ///
    /// Blocks, polling every `options.poll_interval`, until the lock is
    /// obtained.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockTimeout`] if the lock is still held by
    /// someone else after `options.timeout`, or an I/O error if the lock
    /// file cannot be created.
    pub fn acquire(path: &Path, options: LockOptions) -> StorageResult<Self> {
        Self::acquire_with(path, options, names_file)
    }

    fn acquire_with(
        path: &Path,
        options: LockOptions,
        still_named: impl Fn(&Path, &File) -> io::Result<bool>,
    ) -> StorageResult<Self> {
        let started = Instant::now();
        let mut file = open_lock_file(path)?;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) if still_named(path, &file)? => {
                    debug!(path = %path.display(), waited = ?started.elapsed(), "acquired lock");
                    return Ok(Self {
                        path: path.to_path_buf(),
                        file: Some(file),
                    });
                }
                Ok(()) => {
                    // The previous holder removed the file; lock a fresh one.
                    let _ = FileExt::unlock(&file);
                    file = open_lock_file(path)?;
                }
                Err(err) if is_contended(&err) => {}
                Err(err) => return Err(err.into()),
            }

            if started.elapsed() >= options.timeout {
                return Err(StorageError::LockTimeout {
                    path: path.to_path_buf(),
                    timeout: options.timeout,
                });
            }
            thread::sleep(options.poll_interval);
        }
    }

    /// Returns the lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the lock file and releases the lock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockLost`] if the lock file disappeared while
    /// held, or an I/O error if it could not be removed or unlocked. The
    /// lock itself is always released.
    pub fn release(mut self) -> StorageResult<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> StorageResult<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let removed = match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StorageError::LockLost {
                path: self.path.clone(),
            }),
            Err(err) => Err(err.into()),
        };
        let unlocked = FileExt::unlock(&file);
        drop(file);

        removed?;
        unlocked?;
        debug!(path = %self.path.display(), "released lock");
        Ok(())
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(err) = self.release_inner() {
            warn!(path = %self.path.display(), error = %err, "failed to release lock");
        }
    }
}

fn open_lock_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Checks that `path` still refers to the file we locked.
#[cfg(unix)]
fn names_file(path: &Path, file: &File) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let on_disk = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    let held = file.metadata()?;
    Ok(on_disk.dev() == held.dev() && on_disk.ino() == held.ino())
}

#[cfg(not(unix))]
fn names_file(path: &Path, _file: &File) -> io::Result<bool> {
    Ok(path.exists())
}
