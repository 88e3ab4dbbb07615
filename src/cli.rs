//! Command-line definitions and the maintenance commands.

use crate::backend::{build_factory, BackendKind};
use crate::config::{BenchOpts, ConnectionOpts};
use anyhow::Context;
use clap::{Parser, Subcommand};
use kv_client::MemoryKvStore;

#[derive(Parser)]
#[command(name = "kv-bench")]
#[command(about = "Write/read throughput benchmark for Redis Cluster, NATS KV and Dragonfly")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Benchmark the selected backends (the default without a subcommand)
    Run {
        #[command(flatten)]
        opts: BenchOpts,
    },

    /// Delete every key of one backend
    Flush {
        /// Backend to flush
        #[arg(value_enum)]
        backend: BackendKind,

        #[command(flatten)]
        connection: ConnectionOpts,
    },

    /// Delete the keys written under one worker prefix
    Cleanup {
        /// Backend to clean up
        #[arg(value_enum)]
        backend: BackendKind,

        /// Key prefix of the worker, as printed in its report lines
        #[arg(long)]
        prefix: String,

        #[command(flatten)]
        connection: ConnectionOpts,
    },
}

/// Benchmark options taken from the environment alone.
#[derive(Parser)]
#[command(name = "kv-bench")]
pub struct EnvOnly {
    #[command(flatten)]
    pub opts: BenchOpts,
}

/// Remove every key of `backend`.
pub async fn flush_backend(
    backend: BackendKind,
    connection: &ConnectionOpts,
    memory: &MemoryKvStore,
) -> anyhow::Result<()> {
    let client = build_factory(backend, connection, memory)
        .create_client()
        .await
        .with_context(|| format!("Failed to connect to {backend}"))?;
    client
        .flush_all()
        .await
        .with_context(|| format!("Failed to flush {backend}"))?;
    tracing::info!("Flushed {}", client.backend());
    Ok(())
}

/// Remove the keys of `backend` starting with `prefix`, returning how many went.
pub async fn cleanup_backend(
    backend: BackendKind,
    prefix: &str,
    connection: &ConnectionOpts,
    memory: &MemoryKvStore,
) -> anyhow::Result<u64> {
    let client = build_factory(backend, connection, memory)
        .create_client()
        .await
        .with_context(|| format!("Failed to connect to {backend}"))?;
    let deleted = client
        .delete_by_prefix(prefix)
        .await
        .with_context(|| format!("Failed to delete keys with prefix '{prefix}'"))?;
    tracing::info!(
        "Deleted {} keys with prefix '{}' from {}",
        deleted,
        prefix,
        client.backend()
    );
    Ok(deleted)
}
