//! Configuration types for a benchmark run.

use crate::error::LoadTestError;
use serde::Serialize;
use std::time::Duration;

/// Pause between a worker's read phase and its cleanup.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15);

/// Parameters of one benchmark run against one backend.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadConfig {
    /// Operations per worker per phase.
    pub operations_count: u64,
    /// Length of the random value written under every key.
    pub value_length: usize,
    /// Number of concurrent workers.
    pub clients: usize,
    /// Nominal rate limit in ops/sec. Reported only; pacing uses `pace_interval`.
    pub rate_limit: u64,
    /// Minimum delay between two operations of one worker (`None` = unthrottled).
    pub pace_interval: Option<Duration>,
    /// Pause between the read phase and cleanup.
    pub cooldown: Duration,
}

impl WorkloadConfig {
    /// Create a new unthrottled configuration with the default cooldown.
    pub fn new(operations_count: u64, value_length: usize, clients: usize) -> Self {
        Self {
            operations_count,
            value_length,
            clients,
            rate_limit: 0,
            pace_interval: None,
            cooldown: DEFAULT_COOLDOWN,
        }
    }

    /// Set the nominal rate limit.
    pub fn with_rate_limit(mut self, rate_limit: u64) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the pacing interval. A zero interval disables pacing.
    pub fn with_pace_interval(mut self, interval: Duration) -> Self {
        self.pace_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Set the cooldown between read phase and cleanup.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Per-operation interval implied by the rate limit (`None` when it is 0).
    pub fn rate_limit_interval(&self) -> Option<Duration> {
        (self.rate_limit > 0).then(|| Duration::from_secs(1) / self.rate_limit as u32)
    }

    /// Reject configurations that cannot produce a meaningful sample.
    pub fn validate(&self) -> Result<(), LoadTestError> {
        if self.clients == 0 {
            return Err(LoadTestError::Config(
                "client count must be at least 1".to_string(),
            ));
        }
        if self.operations_count == 0 {
            return Err(LoadTestError::Config(
                "operations count must be at least 1".to_string(),
            ));
        }
        if self.value_length == 0 {
            return Err(LoadTestError::Config(
                "value length must be at least 1".to_string(),
            ));
        }
        if self.rate_limit > u32::MAX as u64 {
            return Err(LoadTestError::Config(format!(
                "rate limit {} is out of range",
                self.rate_limit
            )));
        }
        Ok(())
    }
}
