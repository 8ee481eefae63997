//! Storage backend trait definition.

use crate::error::StorageResult;
use std::path::Path;

/// An ordered, transactional bucket store.
///
/// Backends are **opaque byte stores**: values are raw bytes and the
/// backend never interprets them. The cryptkv value pipeline owns all
/// encoding.
///
/// # Invariants
///
/// - Every method runs in exactly one transaction of the underlying engine
/// - Write methods either commit in full or leave no trace
/// - Reads observe a consistent snapshot
/// - `keys` and `buckets` return names in byte order
/// - Operations on a missing bucket fail with
///   [`StorageError::BucketNotFound`](crate::StorageError::BucketNotFound);
///   only `create_bucket` creates buckets
///
/// # Implementors
///
/// - [`super::FileBackend`] - Durable, single-file storage
/// - [`super::InMemoryBackend`] - For testing
pub trait StorageBackend: Send + Sync {
    /// Creates `bucket` if it does not exist. Creating an existing bucket
    /// succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the transaction fails.
    fn create_bucket(&self, bucket: &str) -> StorageResult<()>;

    /// Returns the raw bytes stored under `key`, or `None` if the key does
    /// not exist.
    fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket is missing, the key is empty or the
    /// transaction fails.
    fn put(&self, bucket: &str, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Deletes `key`. Deleting a key that does not exist succeeds.
    fn delete(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Returns every key in `bucket`.
    fn keys(&self, bucket: &str) -> StorageResult<Vec<String>>;

    /// Returns the names of all buckets.
    fn buckets(&self) -> StorageResult<Vec<String>>;

    /// Returns the backing file, if the backend has one.
    fn path(&self) -> Option<&Path>;
}

/// Rejects empty bucket names.
pub(crate) fn check_bucket_name(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() {
        return Err(crate::StorageError::invalid_name("bucket name is required"));
    }
    Ok(())
}

/// Rejects empty keys.
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(crate::StorageError::invalid_name("key is required"));
    }
    Ok(())
}
