//! Workload driver for kv-bench.
//!
//! For one backend the driver:
//! 1. Opens one client per worker and hands each worker a unique key prefix
//! 2. Runs all workers concurrently: write phase, barrier, read phase,
//!    cooldown, prefix cleanup
//! 3. Drains every write sample, then every read sample, and prints the
//!    average ops/sec of each phase
//! 4. Waits for all workers to finish their cleanup
//!
//! Any failing operation aborts the whole run.
//!
//! # Example
//!
//! ```ignore
//! use kv_client::{MemoryFactory, MemoryKvStore};
//! use kv_loadtest::{run_backend, WorkloadConfig};
//!
//! let config = WorkloadConfig::new(100, 16, 4).with_cooldown(Duration::ZERO);
//! let report = run_backend(&MemoryFactory::new(MemoryKvStore::new()), &config).await?;
//! println!("{}", report.summary_lines().join("\n"));
//! ```

pub mod config;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod pacer;
pub mod pipeline;
pub mod report;
pub mod worker;

pub use config::{WorkloadConfig, DEFAULT_COOLDOWN};
pub use error::LoadTestError;
pub use keys::{key_for, random_string, PrefixAllocator, PREFIX_LENGTH};
pub use metrics::{Phase, PhaseSample, ThroughputSummary};
pub use pacer::Pacer;
pub use pipeline::run_backend;
pub use report::BackendReport;
pub use worker::{Worker, WorkerOutcome, WorkerState};
