//! Optional minimum delay between a worker's operations.

use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Paces a loop to at most one operation per interval.
///
/// Without an interval every [`Pacer::tick`] returns immediately.
pub struct Pacer {
    interval: Option<Interval>,
}

impl Pacer {
    /// Must be called from within a tokio runtime when `period` is set.
    pub fn new(period: Option<Duration>) -> Self {
        let interval = period.filter(|p| !p.is_zero()).map(|p| {
            let mut ticker = interval(p);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        Self { interval }
    }

    pub fn is_throttled(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait until the next operation may start. The first tick is immediate.
    pub async fn tick(&mut self) {
        if let Some(ticker) = self.interval.as_mut() {
            ticker.tick().await;
        }
    }
}
