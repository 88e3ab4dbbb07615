//! Command-line interface for kv-bench
//!
//! # Usage Examples
//!
//! ## Benchmark
//! ```bash
//! # Configured entirely from the environment, idles when done
//! OPERATIONS_COUNT=10000 RATE_LIMIT=0 CLIENT_COUNT=8 VALUE_LENGTH=256 kv-bench
//!
//! # Only NATS, one shared connection, JSON summary
//! kv-bench run --operations-count 10000 --rate-limit 0 --client-count 8 \
//!   --value-length 256 --backends nats --share-connection \
//!   --json nats.json --exit-when-done
//! ```
//!
//! ## Maintenance
//! ```bash
//! # Remove every key of one backend
//! kv-bench flush dragonfly
//!
//! # Remove the keys of one crashed worker
//! kv-bench cleanup redis-cluster --prefix AbCdEfGhIj
//! ```

use clap::Parser;
use kv_bench::cli::{cleanup_backend, flush_backend, Cli, Commands, EnvOnly};
use kv_bench::{format_table, run_benchmarks, BenchOpts};
use kv_client::MemoryKvStore;
use std::time::Duration;

/// How long the idle loop sleeps between wake-ups.
const PARK_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { opts }) => run_bench(opts).await,
        None => {
            // Without a subcommand the benchmark is configured from the environment.
            let opts = EnvOnly::parse_from(["kv-bench"]).opts;
            run_bench(opts).await
        }
        Some(Commands::Flush {
            backend,
            connection,
        }) => {
            flush_backend(backend, &connection, &MemoryKvStore::new()).await?;
            println!("Flushed {backend}");
            Ok(())
        }
        Some(Commands::Cleanup {
            backend,
            prefix,
            connection,
        }) => {
            let deleted =
                cleanup_backend(backend, &prefix, &connection, &MemoryKvStore::new()).await?;
            println!("Deleted {deleted} keys with prefix '{prefix}' from {backend}");
            Ok(())
        }
    }
}

/// Run the benchmark, report, then idle unless asked to exit.
async fn run_bench(opts: BenchOpts) -> anyhow::Result<()> {
    let summary = run_benchmarks(&opts, &MemoryKvStore::new()).await?;

    println!("{}", format_table(&summary));

    if let Some(path) = &opts.json {
        summary.write_json(path)?;
        tracing::info!("Run summary written to {:?}", path);
    }

    if opts.exit_when_done {
        return Ok(());
    }

    // Idle until the process is stopped.
    tracing::info!("Benchmark finished, idling");
    loop {
        tokio::time::sleep(PARK_INTERVAL).await;
    }
}
