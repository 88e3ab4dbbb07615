//! Error types for the Redis adapters.

use kv_client::KvClientError;
use thiserror::Error;

/// Errors raised while talking to a Redis-protocol server.
#[derive(Error, Debug)]
pub enum RedisKvError {
    /// Connection, protocol or command error from redis-rs.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl RedisKvError {
    /// Convert into the backend-neutral error, tagged with the backend label.
    pub fn into_client_error(self, backend: &str) -> KvClientError {
        match self {
            RedisKvError::Redis(err) if err.is_connection_refusal() || err.is_io_error() => {
                KvClientError::connect(backend, err)
            }
            other => KvClientError::backend(backend, other),
        }
    }
}
