//! One simulated client: write phase, read phase, cooldown, cleanup.

use crate::config::WorkloadConfig;
use crate::error::LoadTestError;
use crate::keys::{key_for, random_string};
use crate::metrics::{Phase, PhaseSample};
use crate::pacer::Pacer;
use kv_client::{KvClient, KvClientError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Barrier};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Lifecycle of a worker. Failures end the run instead of moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Created,
    Writing,
    Reading,
    CoolingDown,
    Cleaning,
    Done,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Created => "created",
            WorkerState::Writing => "writing",
            WorkerState::Reading => "reading",
            WorkerState::CoolingDown => "cooling down",
            WorkerState::Cleaning => "cleaning",
            WorkerState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Channels and synchronisation shared by all workers of a run.
#[derive(Clone)]
pub struct WorkerChannels {
    pub set_samples: mpsc::Sender<PhaseSample>,
    pub get_samples: mpsc::Sender<PhaseSample>,
    /// Passed by every worker between its write and read phase.
    pub writes_done: Arc<Barrier>,
}

/// Result of a worker that ran to completion.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub worker: usize,
    pub prefix: String,
    /// Keys removed by the cleanup phase.
    pub keys_deleted: u64,
}

/// A worker owning one client and one key namespace.
pub struct Worker {
    id: usize,
    client: Arc<dyn KvClient>,
    backend: String,
    prefix: String,
    config: Arc<WorkloadConfig>,
    state: WorkerState,
}

impl Worker {
    pub fn new(
        id: usize,
        client: Arc<dyn KvClient>,
        backend: impl Into<String>,
        prefix: impl Into<String>,
        config: Arc<WorkloadConfig>,
    ) -> Self {
        Self {
            id,
            client,
            backend: backend.into(),
            prefix: prefix.into(),
            config,
            state: WorkerState::Created,
        }
    }

    fn transition(&mut self, next: WorkerState) {
        debug!(
            "Worker {} ({}, prefix '{}'): {} -> {}",
            self.id, self.backend, self.prefix, self.state, next
        );
        self.state = next;
    }

    fn fail(&self, phase: Phase, source: KvClientError) -> LoadTestError {
        LoadTestError::Worker {
            worker: self.id,
            prefix: self.prefix.clone(),
            phase,
            source,
        }
    }

    /// Run the whole worker lifecycle.
    pub async fn run(mut self, channels: WorkerChannels) -> Result<WorkerOutcome, LoadTestError> {
        self.transition(WorkerState::Writing);
        let (set_sample, value) = self.write_phase().await?;
        println!("{}", set_sample.report_line(&self.config));
        channels
            .set_samples
            .send(set_sample)
            .await
            .map_err(|_| LoadTestError::ChannelClosed(Phase::Set))?;

        channels.writes_done.wait().await;

        self.transition(WorkerState::Reading);
        let get_sample = self.read_phase(&value).await?;
        println!("{}", get_sample.report_line(&self.config));
        channels
            .get_samples
            .send(get_sample)
            .await
            .map_err(|_| LoadTestError::ChannelClosed(Phase::Get))?;

        self.transition(WorkerState::CoolingDown);
        tokio::time::sleep(self.config.cooldown).await;

        self.transition(WorkerState::Cleaning);
        let keys_deleted = self
            .client
            .delete_by_prefix(&self.prefix)
            .await
            .map_err(|e| self.fail(Phase::Cleanup, e))?;

        self.transition(WorkerState::Done);
        Ok(WorkerOutcome {
            worker: self.id,
            prefix: self.prefix.clone(),
            keys_deleted,
        })
    }

    /// Write one random value under every key of the namespace.
    ///
    /// Returns the sample and the value written.
    pub async fn write_phase(&self) -> Result<(PhaseSample, String), LoadTestError> {
        let value = random_string(self.config.value_length);
        let mut pacer = Pacer::new(self.config.pace_interval);

        let start = Instant::now();
        for i in 0..self.config.operations_count {
            pacer.tick().await;
            self.client
                .set(&key_for(&self.prefix, i), &value)
                .await
                .map_err(|e| self.fail(Phase::Set, e))?;
        }
        let elapsed = start.elapsed();

        Ok((self.sample(Phase::Set, elapsed), value))
    }

    /// Read every key back in write order and check it holds `expected`.
    pub async fn read_phase(&self, expected: &str) -> Result<PhaseSample, LoadTestError> {
        let mut pacer = Pacer::new(self.config.pace_interval);

        let start = Instant::now();
        for i in 0..self.config.operations_count {
            pacer.tick().await;
            let key = key_for(&self.prefix, i);
            let value = self
                .client
                .get(&key)
                .await
                .map_err(|e| self.fail(Phase::Get, e))?;
            if value != expected {
                return Err(LoadTestError::ValueMismatch {
                    worker: self.id,
                    key,
                    expected_len: expected.len(),
                    actual_len: value.len(),
                });
            }
        }
        let elapsed = start.elapsed();

        Ok(self.sample(Phase::Get, elapsed))
    }

    fn sample(&self, phase: Phase, elapsed: Duration) -> PhaseSample {
        let sample = PhaseSample::new(
            self.id,
            &self.backend,
            &self.prefix,
            phase,
            self.config.operations_count,
            self.config.value_length,
            elapsed,
        );
        if !sample.is_measurable() {
            warn!(
                "Worker {} ({}) finished its {} phase in zero time, counted as 0 ops/sec",
                self.id,
                self.client.backend(),
                phase
            );
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kv_client::MemoryKvStore;
    use tokio_test::{assert_err, assert_ok};

    fn worker(store: &MemoryKvStore, config: WorkloadConfig) -> Worker {
        Worker::new(
            0,
            Arc::new(store.client()),
            "memory",
            "PrEfIx0001",
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn test_write_phase_keys_and_value() {
        let store = MemoryKvStore::new().with_recording();
        let w = worker(&store, WorkloadConfig::new(25, 12, 1));

        let (sample, value) = assert_ok!(w.write_phase().await);

        let sets = store.recorded_sets();
        assert_eq!(sets.len(), 25);
        for (i, (key, v)) in sets.iter().enumerate() {
            assert_eq!(key, &format!("PrEfIx0001-key-{i}"));
            assert_eq!(v, &value);
        }
        assert_eq!(value.len(), 12);
        assert_eq!(sample.operations, 25);
        assert_eq!(sample.phase, Phase::Set);
        assert_eq!(sample.prefix, "PrEfIx0001");
        assert_eq!(sample.value_length, 12);
    }

    #[tokio::test]
    async fn test_read_phase_after_write() {
        let store = MemoryKvStore::new();
        let w = worker(&store, WorkloadConfig::new(10, 8, 1));

        let (_, value) = assert_ok!(w.write_phase().await);
        let sample = assert_ok!(w.read_phase(&value).await);

        assert_eq!(sample.phase, Phase::Get);
        assert_eq!(sample.operations, 10);
    }

    #[tokio::test]
    async fn test_read_phase_detects_missing_key() {
        let store = MemoryKvStore::new();
        let w = worker(&store, WorkloadConfig::new(3, 8, 1));

        let err = assert_err!(w.read_phase("whatever").await);
        match err {
            LoadTestError::Worker { phase, source, .. } => {
                assert_eq!(phase, Phase::Get);
                assert!(source.is_not_found());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_read_phase_detects_changed_value() {
        let store = MemoryKvStore::new();
        let w = worker(&store, WorkloadConfig::new(3, 8, 1));
        assert_ok!(w.write_phase().await);

        let err = assert_err!(w.read_phase("not-the-value").await);
        assert!(matches!(err, LoadTestError::ValueMismatch { .. }));
    }

    #[tokio::test]
    async fn test_full_lifecycle_cleans_up() {
        let store = MemoryKvStore::new();
        let config = WorkloadConfig::new(20, 8, 1).with_cooldown(Duration::ZERO);
        let w = worker(&store, config);

        let (set_tx, mut set_rx) = mpsc::channel(1);
        let (get_tx, mut get_rx) = mpsc::channel(1);
        let channels = WorkerChannels {
            set_samples: set_tx,
            get_samples: get_tx,
            writes_done: Arc::new(Barrier::new(1)),
        };

        let outcome = assert_ok!(w.run(channels).await);

        assert_eq!(outcome.keys_deleted, 20);
        assert!(store.is_empty());
        assert_eq!(set_rx.recv().await.unwrap().phase, Phase::Set);
        assert_eq!(get_rx.recv().await.unwrap().phase, Phase::Get);
    }

    #[tokio::test]
    async fn test_set_failure_stops_worker() {
        let store = MemoryKvStore::new();
        store.fail_set_after(5);
        let w = worker(&store, WorkloadConfig::new(10, 8, 1));

        let err = assert_err!(w.write_phase().await);
        assert!(matches!(
            err,
            LoadTestError::Worker {
                phase: Phase::Set,
                ..
            }
        ));
        assert_eq!(store.set_calls(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_time_phase_is_kept_as_unmeasurable() {
        let store = MemoryKvStore::new();
        let w = worker(&store, WorkloadConfig::new(5, 8, 1));

        // The paused clock does not advance across the in-memory writes.
        let (sample, _) = assert_ok!(w.write_phase().await);

        assert!(!sample.is_measurable());
        assert_eq!(sample.ops_per_second(), 0.0);
        assert_eq!(sample.operations, 5);
    }
}
