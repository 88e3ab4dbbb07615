//! kv-bench library
//!
//! Measures write and read throughput of several key-value backends with the
//! same workload: N concurrent clients each write `OPERATIONS_COUNT` fixed-size
//! values under a private key prefix, read them back, and clean up.
//!
//! # Backends
//!
//! - `redis-cluster` - Redis Cluster through `kv_client_redis`
//! - `nats` - NATS JetStream key-value bucket through `kv_client_nats`
//! - `dragonfly` - Dragonfly through the standalone Redis adapter
//! - `memory` - process-local store, useful for dry runs
//!
//! # CLI Usage
//!
//! ```bash
//! # Benchmark every default backend, configured from the environment
//! OPERATIONS_COUNT=10000 RATE_LIMIT=0 CLIENT_COUNT=8 VALUE_LENGTH=256 kv-bench
//!
//! # Dry run against the in-memory backend, then exit
//! kv-bench run --operations-count 1000 --rate-limit 0 --client-count 4 \
//!   --value-length 16 --backends memory --cooldown-secs 0 --exit-when-done
//!
//! # Remove leftovers of a crashed run
//! kv-bench cleanup dragonfly --prefix AbCdEfGhIj
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod summary;

pub use backend::{build_factory, run_benchmarks, BackendKind};
pub use config::{BenchOpts, ConnectionOpts};
pub use summary::{format_table, RunSummary};
