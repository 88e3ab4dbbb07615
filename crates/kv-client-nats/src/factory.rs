//! Client factory for the NATS backend.

use crate::client::NatsKvClient;
use async_trait::async_trait;
use kv_client::{ClientFactory, KvClient, KvClientError};
use std::sync::Arc;

/// Opens one NATS connection and bucket handle per worker.
pub struct NatsFactory {
    urls: String,
    bucket: String,
}

impl NatsFactory {
    pub fn new(urls: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            urls: urls.into(),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ClientFactory for NatsFactory {
    fn name(&self) -> &str {
        "nats"
    }

    async fn create_client(&self) -> Result<Arc<dyn KvClient>, KvClientError> {
        let client = NatsKvClient::connect(&self.urls, &self.bucket).await?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_server_list_fails_before_connecting() {
        let factory = NatsFactory::new("", "bucket");
        match factory.create_client().await {
            Ok(_) => panic!("expected a configuration error"),
            Err(err) => assert!(matches!(err, KvClientError::Connect { .. })),
        }
    }
}
