//! The uniform four-operation key-value contract.

use crate::error::KvClientError;
use async_trait::async_trait;

/// A connection to one key-value backend.
///
/// Implementations are thin wrappers over the backend's own client library.
/// They carry no state beyond the connection itself.
#[async_trait]
pub trait KvClient: Send + Sync {
    /// Short label used in logs and error messages (e.g. `redis-cluster`).
    fn backend(&self) -> &str;

    /// Overwrite `key` with `value`.
    async fn set(&self, key: &str, value: &str) -> Result<(), KvClientError>;

    /// Read the value stored under `key`.
    ///
    /// A missing key yields [`KvClientError::NotFound`].
    async fn get(&self, key: &str) -> Result<String, KvClientError>;

    /// Remove every key in the backend namespace.
    async fn flush_all(&self) -> Result<(), KvClientError>;

    /// Delete every key whose name starts with `prefix`.
    ///
    /// Returns the number of deleted keys. Not atomic: a failing delete
    /// aborts the scan after an unspecified number of successful deletes.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, KvClientError>;
}
