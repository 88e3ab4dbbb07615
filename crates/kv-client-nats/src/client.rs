//! [`KvClient`] implementation over a JetStream key-value bucket.

use crate::error::{NatsKvError, BACKEND};
use async_nats::jetstream::{self, kv, stream::StorageType};
use async_nats::ServerAddr;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use kv_client::{KvClient, KvClientError};
use tracing::{debug, info, warn};

/// Split a comma-separated server list into parsed addresses.
pub fn parse_server_list(urls: &str) -> Result<Vec<ServerAddr>, NatsKvError> {
    let servers = urls
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| {
            url.parse::<ServerAddr>()
                .map_err(|source| NatsKvError::InvalidServer {
                    url: url.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if servers.is_empty() {
        return Err(NatsKvError::Config("no NATS server URL given".to_string()));
    }
    Ok(servers)
}

/// Adapter over one NATS connection and one KV bucket.
pub struct NatsKvClient {
    // Keeps the connection alive for as long as the store handle is used.
    _client: async_nats::Client,
    store: kv::Store,
    bucket: String,
}

impl NatsKvClient {
    /// Connect to `urls` and open `bucket`, creating it if missing.
    pub async fn connect(urls: &str, bucket: &str) -> Result<Self, NatsKvError> {
        let servers = parse_server_list(urls)?;
        let client = async_nats::connect(servers.as_slice()).await?;
        let js = jetstream::new(client.clone());

        let store = match js.get_key_value(bucket).await {
            Ok(store) => {
                debug!("Reusing existing KV bucket '{}'", bucket);
                store
            }
            Err(err) => {
                warn!("KV bucket '{}' not available ({}), creating it", bucket, err);
                js.create_key_value(kv::Config {
                    bucket: bucket.to_string(),
                    storage: StorageType::Memory,
                    ..Default::default()
                })
                .await
                .map_err(|e| NatsKvError::Bucket {
                    bucket: bucket.to_string(),
                    message: e.to_string(),
                })?
            }
        };

        info!("Connected to NATS ({} servers), bucket '{}'", servers.len(), bucket);
        Ok(Self {
            _client: client,
            store,
            bucket: bucket.to_string(),
        })
    }

    async fn list_keys(&self) -> Result<Vec<String>, NatsKvError> {
        let keys = self
            .store
            .keys()
            .await
            .map_err(|e| NatsKvError::operation("list keys", e))?;
        keys.try_collect()
            .await
            .map_err(|e| NatsKvError::operation("list keys", e))
    }

    async fn delete_keys<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a String>,
    ) -> Result<u64, NatsKvError> {
        let mut deleted = 0u64;
        for key in keys {
            self.store
                .delete(key)
                .await
                .map_err(|e| NatsKvError::operation("delete", e))?;
            deleted += 1;
        }
        Ok(deleted)
    }
}

#[async_trait]
impl KvClient for NatsKvClient {
    fn backend(&self) -> &str {
        BACKEND
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvClientError> {
        self.store
            .put(key, Bytes::from(value.to_string()))
            .await
            .map_err(|e| NatsKvError::operation("put", e))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, KvClientError> {
        let entry = self.store.get(key).await.map_err(|e| {
            debug!("KV get '{}' failed: {}", key, e);
            NatsKvError::operation("get", e)
        })?;

        let bytes = entry.ok_or_else(|| KvClientError::NotFound {
            key: key.to_string(),
        })?;

        String::from_utf8(bytes.to_vec()).map_err(|e| KvClientError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    async fn flush_all(&self) -> Result<(), KvClientError> {
        let keys = self.list_keys().await?;
        let deleted = self.delete_keys(&keys).await?;
        info!("Flushed {} keys from bucket '{}'", deleted, self.bucket);
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, KvClientError> {
        let keys = self.list_keys().await?;
        let matching: Vec<&String> = keys.iter().filter(|key| key.starts_with(prefix)).collect();
        let deleted = self.delete_keys(matching).await?;
        debug!(
            "Deleted {} keys with prefix '{}' from bucket '{}'",
            deleted, prefix, self.bucket
        );
        Ok(deleted)
    }
}
