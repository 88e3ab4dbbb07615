//! Client factories used by the workload driver to open one adapter per worker.

use crate::client::KvClient;
use crate::error::KvClientError;
use async_trait::async_trait;
use std::sync::Arc;

/// Opens new adapter instances for one backend.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Backend label reported alongside throughput samples.
    fn name(&self) -> &str;

    /// Open a client. Called once per worker.
    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError>;
}

/// Hands out the same, already-connected client to every caller.
///
/// The client is built once by the caller at startup and injected here, so
/// sharing a connection never relies on hidden global state.
pub struct SharedClientFactory {
    name: String,
    client: Arc<dyn KvClient>,
}

impl SharedClientFactory {
    /// Wrap an existing client.
    pub fn new(name: impl Into<String>, client: Arc<dyn KvClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }

    /// Open a client from `factory` once and share it from then on.
    pub async fn from_factory(factory: &dyn ClientFactory) -> Result<Self, KvClientError> {
        let client = factory.create_client().await?;
        Ok(Self::new(factory.name(), client))
    }
}

#[async_trait]
impl ClientFactory for SharedClientFactory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError> {
        Ok(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryFactory, MemoryKvStore};

    #[tokio::test]
    async fn test_shared_factory_returns_same_client() {
        let store = MemoryKvStore::new();
        let shared = SharedClientFactory::from_factory(&MemoryFactory::new(store))
            .await
            .unwrap();

        let a = shared.create_client().await.unwrap();
        let b = shared.create_client().await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(shared.name(), "memory");
    }
}
