//! File path conventions.
//!
//! A store lives in a single database file `<base>.db` guarded by a lock
//! file `<base>.lock` next to it:
//!
//! ```text
//! app      -> app.db   + app.lock
//! app.db   -> app.db   + app.lock
//! app.txt  -> app.txt.db + app.txt.lock
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension of the database file.
pub const DB_EXTENSION: &str = "db";
/// Extension of the lock file.
pub const LOCK_EXTENSION: &str = "lock";

/// Appends the `.db` suffix to `path` unless it already ends with it.
#[must_use]
pub fn db_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == DB_EXTENSION) {
        return path.to_path_buf();
    }

    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(DB_EXTENSION);
    PathBuf::from(raw)
}

/// Returns the lock file path for a database path.
///
/// The `.db` suffix (added first if missing) is replaced by `.lock`.
#[must_use]
pub fn lock_path(path: &Path) -> PathBuf {
    db_path(path).with_extension(LOCK_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_suffix() {
        assert_eq!(db_path(Path::new("app")), PathBuf::from("app.db"));
        assert_eq!(
            db_path(Path::new("dir/app.txt")),
            PathBuf::from("dir/app.txt.db")
        );
    }

    #[test]
    fn keeps_existing_suffix() {
        assert_eq!(db_path(Path::new("app.db")), PathBuf::from("app.db"));
    }

    #[test]
    fn lock_replaces_suffix() {
        assert_eq!(lock_path(Path::new("app")), PathBuf::from("app.lock"));
        assert_eq!(lock_path(Path::new("app.db")), PathBuf::from("app.lock"));
        assert_eq!(
            lock_path(Path::new("data.db/app.txt")),
            PathBuf::from("data.db/app.txt.lock")
        );
    }

    #[test]
    fn hidden_file_gets_suffix() {
        assert_eq!(db_path(Path::new(".db")), PathBuf::from(".db.db"));
        assert_eq!(lock_path(Path::new(".db")), PathBuf::from(".db.lock"));
    }
}
