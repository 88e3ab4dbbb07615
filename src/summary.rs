//! Summary of a whole run across backends.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use kv_loadtest::{BackendReport, ThroughputSummary, WorkloadConfig};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Reports of every backend benchmarked in one process run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config: WorkloadConfig,
    pub backends: Vec<BackendReport>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn new(config: WorkloadConfig) -> Self {
        let now = Utc::now();
        Self {
            config,
            backends: Vec::new(),
            started_at: now,
            completed_at: now,
        }
    }

    pub fn push(&mut self, report: BackendReport) {
        self.backends.push(report);
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize run summary")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write run summary to {path:?}"))?;
        Ok(())
    }
}

/// Format the summary as one table row per backend.
pub fn format_table(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Backend",
        "Clients",
        "Operations",
        "Avg set ops/sec",
        "Set min/max",
        "Avg get ops/sec",
        "Get min/max",
        "Duration",
    ]);

    for report in &summary.backends {
        let set = report.set_throughput();
        let get = report.get_throughput();
        table.add_row(vec![
            Cell::new(&report.backend).fg(Color::Cyan),
            Cell::new(report.config.clients),
            Cell::new(report.config.operations_count),
            Cell::new(format!("{:.1}", set.average())),
            Cell::new(format_spread(&set)),
            Cell::new(format!("{:.1}", get.average())),
            Cell::new(format_spread(&get)),
            Cell::new(format_duration(report.duration)),
        ]);
    }

    table.to_string()
}

fn format_spread(summary: &ThroughputSummary) -> String {
    format!("{:.1} / {:.1}", summary.min(), summary.max())
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let total = secs.round() as u64;
        format!("{}m {}s", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kv_loadtest::{Phase, PhaseSample};

    fn sample(backend: &str, phase: Phase, secs: u64) -> PhaseSample {
        PhaseSample::new(
            0,
            backend,
            "PrEfIx0000",
            phase,
            100,
            16,
            Duration::from_secs(secs),
        )
    }

    fn report(backend: &str) -> BackendReport {
        BackendReport {
            backend: backend.to_string(),
            config: WorkloadConfig::new(100, 16, 1),
            set_samples: vec![sample(backend, Phase::Set, 1)],
            get_samples: vec![sample(backend, Phase::Get, 4)],
            keys_deleted: 100,
            started_at: Utc::now(),
            completed_at: Utc::now(),
            duration: Duration::from_secs(75),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_duration(Duration::from_millis(119_600)), "2m 0s");
        assert_eq!(format_duration(Duration::from_millis(119_400)), "1m 59s");
    }

    #[test]
    fn test_table_lists_every_backend() {
        let mut summary = RunSummary::new(WorkloadConfig::new(100, 16, 1));
        summary.push(report("nats"));
        summary.push(report("dragonfly"));

        let table = format_table(&summary);
        assert!(table.contains("nats"));
        assert!(table.contains("dragonfly"));
        assert!(table.contains("100.0"));
        assert!(table.contains("25.0"));
        assert!(table.contains("100.0 / 100.0"));
        assert!(table.contains("Set min/max"));
        assert!(table.contains("1m 15s"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let mut summary = RunSummary::new(WorkloadConfig::new(100, 16, 1));
        summary.push(report("memory"));

        summary.write_json(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["backends"][0]["backend"], "memory");
        assert_eq!(json["config"]["operations_count"], 100);
        assert!(json["started_at"].is_string());
    }
}
