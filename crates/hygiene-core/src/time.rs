//! Time seams for determinism.
//!
//! Two things in the merge flow depend on time: event timestamps and the
//! artificial commit latency. Both are injected so tests can pin or skip them.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstraction over wall-clock time, used to stamp events.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Suspend point between a resolve request and its commit.
///
/// The presentation layer shows a "working" indicator while this is pending.
#[async_trait]
pub trait CommitDelay: Send + Sync {
    /// Waits until the commit may proceed.
    async fn wait(&self);
}

/// Commit delay backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct SleepDelay {
    duration: Duration,
}

impl SleepDelay {
    /// Default latency between a resolve request and its commit.
    pub const DEFAULT: Duration = Duration::from_millis(800);

    /// Creates a delay that sleeps for `duration` before each commit.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured sleep duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for SleepDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

#[async_trait]
impl CommitDelay for SleepDelay {
    async fn wait(&self) {
        if self.duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.duration).await;
        }
    }
}
