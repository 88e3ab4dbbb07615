//! Error types for the workload driver.

use crate::metrics::Phase;
use kv_client::KvClientError;
use thiserror::Error;

/// Errors that end a benchmark run.
#[derive(Error, Debug)]
pub enum LoadTestError {
    /// Invalid workload parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Opening a client for a worker failed.
    #[error("Client error: {0}")]
    Client(#[from] KvClientError),

    /// A backend operation failed inside a worker.
    #[error("Worker {worker} (prefix '{prefix}') failed during {phase}: {source}")]
    Worker {
        worker: usize,
        prefix: String,
        phase: Phase,
        #[source]
        source: KvClientError,
    },

    /// A key read back a different value than the one written.
    #[error("Worker {worker} read a different value for '{key}' ({actual_len} bytes, expected {expected_len})")]
    ValueMismatch {
        worker: usize,
        key: String,
        expected_len: usize,
        actual_len: usize,
    },

    /// The driver stopped listening for samples.
    #[error("Sample channel for {0} closed")]
    ChannelClosed(Phase),

    /// Fewer samples arrived than there are workers.
    #[error("Expected {expected} {phase} samples, received {received}")]
    MissingSamples {
        phase: Phase,
        expected: usize,
        received: usize,
    },

    /// A worker task panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
