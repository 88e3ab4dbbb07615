//! Error types for the NATS adapter.

use kv_client::KvClientError;
use thiserror::Error;

pub(crate) const BACKEND: &str = "nats";

/// Errors raised while talking to NATS JetStream.
#[derive(Error, Debug)]
pub enum NatsKvError {
    /// No usable server URL was given.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A server URL could not be parsed.
    #[error("Invalid NATS server address '{url}': {source}")]
    InvalidServer {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not connect to any server.
    #[error("NATS connect error: {0}")]
    Connect(#[from] async_nats::ConnectError),

    /// The key-value bucket could not be opened or created.
    #[error("KV bucket '{bucket}' error: {message}")]
    Bucket { bucket: String, message: String },

    /// A key-value operation failed.
    #[error("KV {operation} failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}

impl NatsKvError {
    pub(crate) fn operation(operation: &'static str, err: impl std::fmt::Display) -> Self {
        NatsKvError::Operation {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<NatsKvError> for KvClientError {
    fn from(err: NatsKvError) -> Self {
        match err {
            NatsKvError::Config(_) | NatsKvError::InvalidServer { .. } | NatsKvError::Connect(_) => {
                KvClientError::connect(BACKEND, err)
            }
            other => KvClientError::backend(BACKEND, other),
        }
    }
}
