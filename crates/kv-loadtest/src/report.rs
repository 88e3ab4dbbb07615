//! Result of a benchmark run against one backend.

use crate::config::WorkloadConfig;
use crate::metrics::{Phase, PhaseSample, ThroughputSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Aggregated outcome of one backend run.
#[derive(Debug, Clone, Serialize)]
pub struct BackendReport {
    /// Backend label.
    pub backend: String,
    /// Configuration the run used.
    pub config: WorkloadConfig,
    /// Per-worker write samples, in arrival order.
    pub set_samples: Vec<PhaseSample>,
    /// Per-worker read samples, in arrival order.
    pub get_samples: Vec<PhaseSample>,
    /// Keys removed by the workers' cleanup phases.
    pub keys_deleted: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Wall clock time of the run, worker cleanup included.
    pub duration: Duration,
}

impl BackendReport {
    /// Aggregate of the write samples.
    pub fn set_throughput(&self) -> ThroughputSummary {
        ThroughputSummary::from_samples(Phase::Set, &self.set_samples)
    }

    /// Aggregate of the read samples.
    pub fn get_throughput(&self) -> ThroughputSummary {
        ThroughputSummary::from_samples(Phase::Get, &self.get_samples)
    }

    /// The two average lines printed at the end of a run.
    pub fn summary_lines(&self) -> [String; 2] {
        average_lines(&self.set_throughput(), &self.get_throughput())
    }
}

/// Format the average set and get lines.
pub fn average_lines(set: &ThroughputSummary, get: &ThroughputSummary) -> [String; 2] {
    [
        format!("Average set ops per second: {}", set.average()),
        format!("Average get ops per second: {}", get.average()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(worker: usize, phase: Phase, secs: u64) -> PhaseSample {
        PhaseSample::new(
            worker,
            "memory",
            format!("PrEfIx000{worker}"),
            phase,
            100,
            16,
            Duration::from_secs(secs),
        )
    }

    fn test_report() -> BackendReport {
        BackendReport {
            backend: "memory".to_string(),
            config: WorkloadConfig::new(100, 16, 2),
            set_samples: vec![sample(0, Phase::Set, 1), sample(1, Phase::Set, 4)],
            get_samples: vec![sample(0, Phase::Get, 2), sample(1, Phase::Get, 2)],
            keys_deleted: 200,
            started_at: Utc::now(),
            completed_at: Utc::now(),
            duration: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_throughput_from_samples() {
        let report = test_report();
        // (100 + 25) / 2
        assert_eq!(report.set_throughput().average(), 62.5);
        assert_eq!(report.get_throughput().average(), 50.0);
    }

    #[test]
    fn test_summary_lines() {
        let [set, get] = test_report().summary_lines();
        assert_eq!(set, "Average set ops per second: 62.5");
        assert_eq!(get, "Average get ops per second: 50");
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(test_report()).unwrap();
        assert_eq!(json["backend"], "memory");
        assert_eq!(json["keys_deleted"], 200);
        assert_eq!(json["set_samples"][0]["phase"], "set");
    }
}
