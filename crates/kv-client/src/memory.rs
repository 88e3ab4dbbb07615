//! Process-local key-value backend.
//!
//! Used for dry runs of the benchmark and as the backend of the driver's
//! tests. All clients opened on one [`MemoryKvStore`] share its namespace,
//! the same way every connection to a real server sees the same keys.

use crate::client::KvClient;
use crate::error::KvClientError;
use crate::factory::ClientFactory;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const BACKEND: &str = "memory";

#[derive(Default)]
struct Inner {
    data: Mutex<BTreeMap<String, String>>,
    set_calls: AtomicU64,
    // u64::MAX means "never fail".
    fail_set_after: AtomicU64,
    recording: Mutex<Option<Vec<(String, String)>>>,
}

/// Shared in-memory namespace.
#[derive(Clone)]
pub struct MemoryKvStore {
    inner: Arc<Inner>,
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKvStore {
    pub fn new() -> Self {
        let inner = Inner {
            fail_set_after: AtomicU64::new(u64::MAX),
            ..Default::default()
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Record every successful `set` so callers can inspect the issued keys.
    pub fn with_recording(self) -> Self {
        *lock(&self.inner.recording) = Some(Vec::new());
        self
    }

    /// Make every `set` after the first `n` successful ones fail.
    pub fn fail_set_after(&self, n: u64) {
        self.inner.fail_set_after.store(n, Ordering::SeqCst);
    }

    /// Open a new client handle onto this namespace.
    pub fn client(&self) -> MemoryKvClient {
        MemoryKvClient {
            store: self.clone(),
        }
    }

    /// Number of `set` calls issued so far, failed ones included.
    pub fn set_calls(&self) -> u64 {
        self.inner.set_calls.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        lock(&self.inner.data).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently stored that start with `prefix`, in order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        lock(&self.inner.data)
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Successful `set` calls in issue order, if recording is enabled.
    pub fn recorded_sets(&self) -> Vec<(String, String)> {
        lock(&self.inner.recording).clone().unwrap_or_default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Client handle onto a [`MemoryKvStore`].
pub struct MemoryKvClient {
    store: MemoryKvStore,
}

#[async_trait]
impl KvClient for MemoryKvClient {
    fn backend(&self) -> &str {
        BACKEND
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvClientError> {
        let inner = &self.store.inner;
        let issued = inner.set_calls.fetch_add(1, Ordering::SeqCst);
        if issued >= inner.fail_set_after.load(Ordering::SeqCst) {
            return Err(KvClientError::backend(BACKEND, "injected set failure"));
        }

        lock(&inner.data).insert(key.to_string(), value.to_string());
        if let Some(log) = lock(&inner.recording).as_mut() {
            log.push((key.to_string(), value.to_string()));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, KvClientError> {
        lock(&self.store.inner.data)
            .get(key)
            .cloned()
            .ok_or_else(|| KvClientError::NotFound {
                key: key.to_string(),
            })
    }

    async fn flush_all(&self) -> Result<(), KvClientError> {
        lock(&self.store.inner.data).clear();
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, KvClientError> {
        let keys = self.store.keys_with_prefix(prefix);
        let mut data = lock(&self.store.inner.data);
        for key in &keys {
            data.remove(key);
        }
        debug!("Deleted {} keys with prefix '{}'", keys.len(), prefix);
        Ok(keys.len() as u64)
    }
}

/// Factory opening [`MemoryKvClient`]s onto one shared store.
pub struct MemoryFactory {
    store: MemoryKvStore,
}

impl MemoryFactory {
    pub fn new(store: MemoryKvStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ClientFactory for MemoryFactory {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError> {
        Ok(Arc::new(self.store.client()))
    }
}
