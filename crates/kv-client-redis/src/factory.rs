//! Client factories for the Redis-protocol backends.

use crate::client::RedisKvClient;
use async_trait::async_trait;
use kv_client::{ClientFactory, KvClient, KvClientError};
use std::sync::Arc;

/// Opens one cluster connection per worker.
pub struct RedisClusterFactory {
    url: String,
    label: String,
}

impl RedisClusterFactory {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

#[async_trait]
impl ClientFactory for RedisClusterFactory {
    fn name(&self) -> &str {
        &self.label
    }

    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError> {
        let client = RedisKvClient::connect_cluster(&self.url, self.label.as_str())
            .await
            .map_err(|e| e.into_client_error(&self.label))?;
        Ok(Arc::new(client))
    }
}

/// Opens one standalone connection per worker (Redis, Dragonfly).
pub struct RedisFactory {
    url: String,
    label: String,
}

impl RedisFactory {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

#[async_trait]
impl ClientFactory for RedisFactory {
    fn name(&self) -> &str {
        &self.label
    }

    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError> {
        let client = RedisKvClient::connect(&self.url, self.label.as_str())
            .await
            .map_err(|e| e.into_client_error(&self.label))?;
        Ok(Arc::new(client))
    }
}
