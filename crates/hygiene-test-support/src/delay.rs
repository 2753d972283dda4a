//! `CommitDelay` doubles that never touch the timer.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hygiene_core::time::CommitDelay;
use tokio::sync::Semaphore;

/// Commits immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDelay;

#[async_trait]
impl CommitDelay for InstantDelay {
    async fn wait(&self) {}
}

/// Commits immediately and counts how many commits went through the delay.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls: AtomicUsize,
}

impl RecordingDelay {
    /// Number of times `wait` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitDelay for RecordingDelay {
    async fn wait(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Holds every commit until the test releases it, so a test can act while a
/// resolution is pending.
#[derive(Debug)]
pub struct GatedDelay {
    gate: Semaphore,
    waiting: AtomicUsize,
}

impl GatedDelay {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            waiting: AtomicUsize::new(0),
        }
    }

    /// Lets `count` pending commits proceed.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Number of commits currently held at the gate.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }
}

impl Default for GatedDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommitDelay for GatedDelay {
    async fn wait(&self) {
        self.waiting.fetch_add(1, Ordering::SeqCst);
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
        self.waiting.fetch_sub(1, Ordering::SeqCst);
    }
}
