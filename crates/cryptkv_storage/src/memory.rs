//! In-memory storage backend for testing.

use crate::backend::{check_bucket_name, check_key, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;

type Buckets = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// An in-memory storage backend.
///
/// This backend stores all data in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Scratch stores that don't need persistence
///
/// The lock plays the role of the engine's transactions: writers are
/// serialized and readers see a consistent state.
///
/// # Example
///
/// ```rust
/// use cryptkv_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.create_bucket("store").unwrap();
/// backend.put("store", "k", b"test data").unwrap();
/// assert_eq!(backend.keys("store").unwrap(), vec!["k".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    buckets: RwLock<Buckets>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every bucket.
    pub fn clear(&self) {
        self.buckets.write().clear();
    }
}

impl StorageBackend for InMemoryBackend {
    fn create_bucket(&self, bucket: &str) -> StorageResult<()> {
        check_bucket_name(bucket)?;
        self.buckets.write().entry(bucket.to_string()).or_default();
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let buckets = self.buckets.read();
        let entries = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, bucket: &str, key: &str, value: &[u8]) -> StorageResult<()> {
        check_key(key)?;
        let mut buckets = self.buckets.write();
        let entries = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.write();
        let entries = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let buckets = self.buckets.read();
        let entries = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        Ok(entries.keys().cloned().collect())
    }

    fn buckets(&self) -> StorageResult<Vec<String>> {
        Ok(self.buckets.read().keys().cloned().collect())
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_put_get_delete() {
        let backend = InMemoryBackend::new();
        backend.create_bucket("b").unwrap();

        backend.put("b", "k", b"v").unwrap();
        assert_eq!(backend.get("b", "k").unwrap(), Some(b"v".to_vec()));

        backend.delete("b", "k").unwrap();
        assert_eq!(backend.get("b", "k").unwrap(), None);
        backend.delete("b", "k").unwrap();
    }

    #[test]
    fn memory_missing_bucket() {
        let backend = InMemoryBackend::new();
        assert!(matches!(
            backend.put("b", "k", b"v"),
            Err(StorageError::BucketNotFound { .. })
        ));
        assert!(matches!(
            backend.keys("b"),
            Err(StorageError::BucketNotFound { .. })
        ));
    }

    #[test]
    fn memory_ordering_matches_bytes() {
        let backend = InMemoryBackend::new();
        backend.create_bucket("zz").unwrap();
        backend.create_bucket("Aa").unwrap();
        backend.create_bucket("store").unwrap();
        assert_eq!(backend.buckets().unwrap(), vec!["Aa", "store", "zz"]);
    }

    #[test]
    fn memory_clear() {
        let backend = InMemoryBackend::new();
        backend.create_bucket("b").unwrap();
        backend.clear();
        assert!(backend.buckets().unwrap().is_empty());
        assert!(backend.path().is_none());
    }
}
