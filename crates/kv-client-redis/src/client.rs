//! [`KvClient`] implementation over redis-rs async connections.

use crate::error::RedisKvError;
use async_trait::async_trait;
use kv_client::{KvClient, KvClientError};
use redis::aio::{ConnectionLike, MultiplexedConnection};
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

/// Number of keys per `DEL` when deleting from a standalone server.
pub const DELETE_BATCH_SIZE: usize = 512;

/// How the server is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Single server (Redis, Dragonfly).
    Standalone,
    /// Redis Cluster; multi-key commands must stay within one hash slot.
    Cluster,
}

impl Topology {
    /// Keys per `DEL` command.
    ///
    /// Cluster keys land in arbitrary slots, so each one is deleted on its own.
    pub fn delete_batch_size(self) -> usize {
        match self {
            Topology::Standalone => DELETE_BATCH_SIZE,
            Topology::Cluster => 1,
        }
    }
}

/// Redis-protocol adapter, generic over the connection flavour.
pub struct RedisKvClient<C> {
    conn: C,
    topology: Topology,
    label: String,
}

impl RedisKvClient<MultiplexedConnection> {
    /// Connect to a standalone server (`redis://[:password@]host:port[/db]`).
    pub async fn connect(url: &str, label: impl Into<String>) -> Result<Self, RedisKvError> {
        let label = label.into();
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to {} at {}", label, url);

        Ok(Self {
            conn,
            topology: Topology::Standalone,
            label,
        })
    }
}

impl RedisKvClient<ClusterConnection> {
    /// Connect to a Redis Cluster through one seed node URL.
    pub async fn connect_cluster(
        url: &str,
        label: impl Into<String>,
    ) -> Result<Self, RedisKvError> {
        let label = label.into();
        let client = ClusterClient::new(vec![url])?;
        let conn = client.get_async_connection().await?;
        info!("Connected to {} cluster via {}", label, url);

        Ok(Self {
            conn,
            topology: Topology::Cluster,
            label,
        })
    }
}

impl<C> RedisKvClient<C> {
    fn error(&self, err: impl Into<RedisKvError>) -> KvClientError {
        err.into().into_client_error(&self.label)
    }
}

/// Build a `KEYS` pattern matching everything that starts with `prefix`.
///
/// Glob metacharacters in the prefix are escaped so they match literally.
pub fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl<C> KvClient for RedisKvClient<C>
where
    C: ConnectionLike + Clone + Send + Sync + 'static,
{
    fn backend(&self) -> &str {
        &self.label
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvClientError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| self.error(e))
    }

    async fn get(&self, key: &str) -> Result<String, KvClientError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(|e| self.error(e))?;
        value.ok_or_else(|| KvClientError::NotFound {
            key: key.to_string(),
        })
    }

    async fn flush_all(&self) -> Result<(), KvClientError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHALL")
            .query_async(&mut conn)
            .await
            .map_err(|e| self.error(e))?;
        info!("Flushed all keys on {}", self.label);
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, KvClientError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn
            .keys(prefix_pattern(prefix))
            .await
            .map_err(|e| self.error(e))?;

        let mut deleted = 0u64;
        for batch in keys.chunks(self.topology.delete_batch_size()) {
            let removed: u64 = conn.del(batch).await.map_err(|e| self.error(e))?;
            deleted += removed;
        }

        debug!(
            "Deleted {} of {} listed keys with prefix '{}' on {}",
            deleted,
            keys.len(),
            prefix,
            self.label
        );
        Ok(deleted)
    }
}
