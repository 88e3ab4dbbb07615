//! Benchmark orchestration for one backend.

use crate::config::WorkloadConfig;
use crate::error::LoadTestError;
use crate::keys::PrefixAllocator;
use crate::metrics::{Phase, PhaseSample, ThroughputSummary};
use crate::report::{average_lines, BackendReport};
use crate::worker::{Worker, WorkerChannels, WorkerOutcome};
use chrono::Utc;
use kv_client::ClientFactory;
use std::sync::Arc;
use tokio::sync::{mpsc, Barrier};
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{debug, info};

type WorkerResult = Result<WorkerOutcome, LoadTestError>;

/// Run the write/read workload against the backend behind `factory`.
///
/// This method:
/// 1. Opens `config.clients` clients one after another, spawning a worker
///    for each as soon as its client is ready
/// 2. Collects every write sample, then every read sample
/// 3. Prints the average set and get ops/sec
/// 4. Waits for every worker's cooldown and cleanup
///
/// The first failing worker aborts the run; the remaining workers are
/// cancelled and no averages are printed.
pub async fn run_backend(
    factory: &dyn ClientFactory,
    config: &WorkloadConfig,
) -> Result<BackendReport, LoadTestError> {
    config.validate()?;

    let backend = factory.name().to_string();
    let clients = config.clients;
    let started_at = Utc::now();
    let start_time = Instant::now();

    info!(
        "Starting {} benchmark: {} clients, {} operations each, {}-byte values",
        backend, clients, config.operations_count, config.value_length
    );

    let config = Arc::new(config.clone());
    let (set_tx, mut set_rx) = mpsc::channel(clients);
    let (get_tx, mut get_rx) = mpsc::channel(clients);
    let channels = WorkerChannels {
        set_samples: set_tx,
        get_samples: get_tx,
        writes_done: Arc::new(Barrier::new(clients)),
    };

    let mut prefixes = PrefixAllocator::default();
    let mut workers: JoinSet<WorkerResult> = JoinSet::new();
    for id in 0..clients {
        let client = factory.create_client().await?;
        let prefix = prefixes.allocate();
        debug!(
            "Spawning worker {} on {} with prefix '{}'",
            id,
            client.backend(),
            prefix
        );
        let worker = Worker::new(id, client, &backend, prefix, config.clone());
        workers.spawn(worker.run(channels.clone()));
    }
    // Only workers hold senders from here on, so a closed channel means they are gone.
    drop(channels);

    let mut outcomes = Vec::with_capacity(clients);
    let set_samples =
        collect_samples(Phase::Set, &mut set_rx, clients, &mut workers, &mut outcomes).await?;
    let get_samples =
        collect_samples(Phase::Get, &mut get_rx, clients, &mut workers, &mut outcomes).await?;

    let set = ThroughputSummary::from_samples(Phase::Set, &set_samples);
    let get = ThroughputSummary::from_samples(Phase::Get, &get_samples);
    for line in average_lines(&set, &get) {
        println!("{line}");
    }
    info!(
        "{} combined throughput: {:.1} set ops/sec, {:.1} get ops/sec",
        backend,
        set.total(),
        get.total()
    );

    while let Some(joined) = workers.join_next().await {
        outcomes.push(worker_result(joined)?);
    }
    for outcome in &outcomes {
        debug!(
            "Worker {} (prefix '{}') removed {} keys",
            outcome.worker, outcome.prefix, outcome.keys_deleted
        );
    }

    let keys_deleted = outcomes.iter().map(|o| o.keys_deleted).sum();
    let duration = start_time.elapsed();
    info!(
        "{} benchmark completed in {:?}, {} keys cleaned up",
        backend, duration, keys_deleted
    );

    Ok(BackendReport {
        backend,
        config: Arc::unwrap_or_clone(config),
        set_samples,
        get_samples,
        keys_deleted,
        started_at,
        completed_at: Utc::now(),
        duration,
    })
}

/// Receive exactly `expected` samples of one phase.
///
/// Workers finishing in the meantime are recorded; a failed worker ends the
/// collection with its error.
async fn collect_samples(
    phase: Phase,
    samples_rx: &mut mpsc::Receiver<PhaseSample>,
    expected: usize,
    workers: &mut JoinSet<WorkerResult>,
    outcomes: &mut Vec<WorkerOutcome>,
) -> Result<Vec<PhaseSample>, LoadTestError> {
    let mut samples = Vec::with_capacity(expected);

    while samples.len() < expected {
        tokio::select! {
            sample = samples_rx.recv() => match sample {
                Some(sample) => samples.push(sample),
                None => {
                    return Err(LoadTestError::MissingSamples {
                        phase,
                        expected,
                        received: samples.len(),
                    })
                }
            },
            Some(joined) = workers.join_next(), if !workers.is_empty() => {
                outcomes.push(worker_result(joined)?);
            }
        }
    }

    debug!("Collected {} {} samples", samples.len(), phase);
    Ok(samples)
}

fn worker_result(joined: Result<WorkerResult, JoinError>) -> WorkerResult {
    joined?
}
