//! Store configuration.

use cryptkv_codec::DEFAULT_COMPRESSION_LEVEL;
use cryptkv_storage::{
    FileOptions, LockOptions, DEFAULT_LOCK_TIMEOUT, DEFAULT_OPEN_TIMEOUT, DEFAULT_POLL_INTERVAL,
};
use std::time::Duration;

/// Name of the table created by every open.
pub const DEFAULT_TABLE: &str = "store";

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interval between lock file acquisition attempts.
    pub lock_poll_interval: Duration,

    /// How long to wait for the lock file before failing with `LockTimeout`.
    pub lock_timeout: Duration,

    /// How long to wait for the storage engine's own file lock.
    pub open_timeout: Duration,

    /// Table created on open.
    pub default_table: String,

    /// Gzip level for stored values (0-9).
    pub compression_level: u32,

    /// Whether to create missing parent directories of the database file.
    pub create_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_poll_interval: DEFAULT_POLL_INTERVAL, // 1 ms
            lock_timeout: DEFAULT_LOCK_TIMEOUT,        // 60 s
            open_timeout: DEFAULT_OPEN_TIMEOUT,        // 1 s
            default_table: DEFAULT_TABLE.to_string(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            create_dirs: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lock polling interval.
    #[must_use]
    pub const fn lock_poll_interval(mut self, interval: Duration) -> Self {
        self.lock_poll_interval = interval;
        self
    }

    /// Sets the lock acquisition timeout.
    #[must_use]
    pub const fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Sets the storage engine open timeout.
    #[must_use]
    pub const fn open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Sets the table created on open.
    #[must_use]
    pub fn default_table(mut self, name: impl Into<String>) -> Self {
        self.default_table = name.into();
        self
    }

    /// Sets the gzip level.
    #[must_use]
    pub const fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }

    pub(crate) fn lock_options(&self) -> LockOptions {
        LockOptions {
            poll_interval: self.lock_poll_interval,
            timeout: self.lock_timeout,
        }
    }

    /// Parent directories are created by the store before the lock file,
    /// so the engine never needs to create them.
    pub(crate) fn file_options(&self) -> FileOptions {
        FileOptions {
            open_timeout: self.open_timeout,
            create_dirs: false,
            ..FileOptions::default()
        }
    }
}
