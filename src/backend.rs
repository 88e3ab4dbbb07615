//! Backend selection and the sequential benchmark loop.

use crate::config::{BenchOpts, ConnectionOpts};
use crate::summary::RunSummary;
use anyhow::Context;
use chrono::Utc;
use clap::ValueEnum;
use kv_client::{ClientFactory, MemoryFactory, MemoryKvStore, SharedClientFactory};
use kv_client_nats::NatsFactory;
use kv_client_redis::{RedisClusterFactory, RedisFactory};
use kv_loadtest::run_backend;
use std::fmt;

/// Key-value backends the benchmark can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Redis Cluster
    #[value(name = "redis-cluster")]
    RedisCluster,
    /// NATS JetStream key-value bucket
    #[value(name = "nats")]
    Nats,
    /// Dragonfly, spoken to as a standalone Redis server
    #[value(name = "dragonfly")]
    Dragonfly,
    /// In-process store
    #[value(name = "memory")]
    Memory,
}

impl BackendKind {
    /// Backends benchmarked when none are selected explicitly.
    pub const DEFAULT_ORDER: [BackendKind; 3] = [
        BackendKind::RedisCluster,
        BackendKind::Nats,
        BackendKind::Dragonfly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::RedisCluster => "redis-cluster",
            BackendKind::Nats => "nats",
            BackendKind::Dragonfly => "dragonfly",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the client factory for `kind`.
///
/// Network backends connect lazily, once per `create_client` call. The
/// memory backend hands out clients of `memory`.
pub fn build_factory(
    kind: BackendKind,
    connection: &ConnectionOpts,
    memory: &MemoryKvStore,
) -> Box<dyn ClientFactory> {
    match kind {
        BackendKind::RedisCluster => Box::new(RedisClusterFactory::new(
            &connection.redis.redis_cluster_url,
            kind.label(),
        )),
        BackendKind::Nats => Box::new(NatsFactory::new(
            &connection.nats.nats_url,
            &connection.nats.nats_bucket,
        )),
        BackendKind::Dragonfly => Box::new(RedisFactory::new(
            &connection.redis.dragonfly_url,
            kind.label(),
        )),
        BackendKind::Memory => Box::new(MemoryFactory::new(memory.clone())),
    }
}

/// Benchmark every selected backend, one after another.
///
/// The first failing backend ends the whole run.
pub async fn run_benchmarks(
    opts: &BenchOpts,
    memory: &MemoryKvStore,
) -> anyhow::Result<RunSummary> {
    let config = opts.workload_config();
    config.validate().context("Invalid benchmark configuration")?;

    let mut summary = RunSummary::new(config.clone());

    for kind in &opts.backends {
        let mut factory = build_factory(*kind, &opts.connection, memory);
        if opts.share_connection {
            tracing::info!("Opening one shared {} client for all workers", kind);
            let shared = SharedClientFactory::from_factory(factory.as_ref())
                .await
                .with_context(|| format!("Failed to connect to {kind}"))?;
            factory = Box::new(shared);
        }

        let report = run_backend(factory.as_ref(), &config)
            .await
            .with_context(|| format!("Benchmark against {kind} failed"))?;
        summary.push(report);
    }

    summary.completed_at = Utc::now();
    Ok(summary)
}
