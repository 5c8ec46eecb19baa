//! Frame pacing.
//!
//! The animator is advanced by whatever drives a [`Ticker`]: a tokio interval
//! in the binary, a virtual clock in tests.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Host frame-pacing primitive.
pub trait Ticker {
    /// Resolves at the next frame with a monotonic timestamp.
    fn next_frame(&mut self) -> impl Future<Output = Duration> + Send;
}

/// Real-time frames from a tokio interval.
#[derive(Debug)]
pub struct IntervalTicker {
    origin: Instant,
    interval: Interval,
}

impl IntervalTicker {
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(16);

    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            origin: Instant::now(),
            interval,
        }
    }
}

impl Ticker for IntervalTicker {
    async fn next_frame(&mut self) -> Duration {
        let at = self.interval.tick().await;
        at.saturating_duration_since(self.origin)
    }
}

/// Virtual clock: every frame is ready immediately and `step` later than the
/// previous one.
#[derive(Debug, Clone)]
pub struct ManualTicker {
    now: Duration,
    step: Duration,
}

impl ManualTicker {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}

impl Ticker for ManualTicker {
    async fn next_frame(&mut self) -> Duration {
        let at = self.now;
        self.now += self.step;
        at
    }
}
