//! Throughput samples and their aggregation.

use crate::config::WorkloadConfig;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Measured phase of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Set,
    Get,
    Cleanup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Set => write!(f, "set"),
            Phase::Get => write!(f, "get"),
            Phase::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Throughput of one worker for one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSample {
    /// Worker index within the run.
    pub worker: usize,
    /// Backend label.
    pub backend: String,
    /// Key prefix owned by the worker.
    pub prefix: String,
    pub phase: Phase,
    /// Operations issued in the phase.
    pub operations: u64,
    /// Length of the value written or read by every operation.
    pub value_length: usize,
    /// Wall clock time of the whole phase loop.
    pub elapsed: Duration,
}

impl PhaseSample {
    pub fn new(
        worker: usize,
        backend: impl Into<String>,
        prefix: impl Into<String>,
        phase: Phase,
        operations: u64,
        value_length: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            worker,
            backend: backend.into(),
            prefix: prefix.into(),
            phase,
            operations,
            value_length,
            elapsed,
        }
    }

    /// Whether the clock advanced during the phase.
    ///
    /// An unmeasurable sample still counts towards the average, as 0 ops/sec.
    pub fn is_measurable(&self) -> bool {
        !self.elapsed.is_zero()
    }

    /// Operations per second over the phase (0 when nothing was measurable).
    pub fn ops_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.operations as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Mean wall clock time per operation.
    pub fn time_per_operation(&self) -> Duration {
        if self.operations == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.operations as f64)
    }

    /// Human-readable line printed by the worker once the phase ends.
    pub fn report_line(&self, config: &WorkloadConfig) -> String {
        format!(
            "backend: {}, prefix: {}, phase: {}, operations: {}, value_length: {}, \
             elapsed: {:?}, rate_limit: {}, rate_limit_interval: {}, pace_interval: {}, \
             ops: {:.2}, time_per_operation: {:?}",
            self.backend,
            self.prefix,
            self.phase,
            self.operations,
            self.value_length,
            self.elapsed,
            config.rate_limit,
            format_interval(config.rate_limit_interval()),
            format_interval(config.pace_interval),
            self.ops_per_second(),
            self.time_per_operation(),
        )
    }
}

fn format_interval(interval: Option<Duration>) -> String {
    match interval {
        Some(d) => format!("{d:?}"),
        None => "none".to_string(),
    }
}

/// Aggregate of the per-worker ops/sec values of one phase.
#[derive(Debug, Clone, Serialize)]
pub struct ThroughputSummary {
    pub phase: Phase,
    /// One ops/sec value per worker.
    pub samples: Vec<f64>,
}

impl ThroughputSummary {
    pub fn new(phase: Phase, samples: Vec<f64>) -> Self {
        Self { phase, samples }
    }

    pub fn from_samples(phase: Phase, samples: &[PhaseSample]) -> Self {
        Self::new(phase, samples.iter().map(PhaseSample::ops_per_second).collect())
    }

    /// Arithmetic mean of the samples (0 when there are none).
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Sum of the samples: the combined throughput of all workers.
    pub fn total(&self) -> f64 {
        self.samples.iter().sum()
    }

    pub fn min(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(phase: Phase, operations: u64, elapsed: Duration) -> PhaseSample {
        PhaseSample::new(0, "memory", "PrEfIx0001", phase, operations, 16, elapsed)
    }

    #[test]
    fn test_ops_per_second() {
        let sample = sample(Phase::Set, 1000, Duration::from_secs(10));
        assert_eq!(sample.ops_per_second(), 100.0);
        assert_eq!(sample.time_per_operation(), Duration::from_millis(10));
    }

    #[test]
    fn test_ops_per_second_zero_duration() {
        let sample = sample(Phase::Get, 1000, Duration::ZERO);
        assert!(!sample.is_measurable());
        assert_eq!(sample.ops_per_second(), 0.0);
    }

    #[test]
    fn test_average_is_mean_of_samples() {
        let summary = ThroughputSummary::new(Phase::Set, vec![100.0, 200.0, 300.0, 400.0]);
        assert_eq!(summary.average(), 250.0);
        assert_eq!(summary.total(), 1000.0);
        assert_eq!(summary.min(), 100.0);
        assert_eq!(summary.max(), 400.0);
    }

    #[test]
    fn test_average_fractional() {
        let samples = vec![1.5, 2.25, 3.125];
        let summary = ThroughputSummary::new(Phase::Get, samples.clone());
        let expected = samples.iter().sum::<f64>() / 3.0;
        assert!((summary.average() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_average_empty() {
        let summary = ThroughputSummary::new(Phase::Get, Vec::new());
        assert_eq!(summary.average(), 0.0);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_report_line() {
        let config = WorkloadConfig::new(100, 16, 4).with_rate_limit(10);
        let sample = PhaseSample::new(
            2,
            "dragonfly",
            "PrEfIx0002",
            Phase::Set,
            100,
            16,
            Duration::from_secs(2),
        );
        let line = sample.report_line(&config);

        assert!(line.starts_with(
            "backend: dragonfly, prefix: PrEfIx0002, phase: set, operations: 100"
        ));
        assert!(line.contains("value_length: 16"));
        assert!(line.contains("rate_limit_interval: 100ms"));
        assert!(line.contains("pace_interval: none"));
        assert!(line.contains("ops: 50.00"));
    }
}
