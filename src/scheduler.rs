//! Cooperative yield primitives
//!
//! A throttled run hands control back to the runtime between batches through
//! a [`Scheduler`]. The only contract is that other pending work gets at
//! least one turn before the run resumes; no wall-clock delay is promised.

use std::time::Duration;

use async_trait::async_trait;

/// Hands control back to the runtime for one scheduling turn
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspend the current task once, letting other ready work run
    async fn yield_turn(&self);
}

/// Yield through [`tokio::task::yield_now`].
///
/// The task is rescheduled behind every other ready task, and tokio only
/// wakes it again after the I/O and timer drivers have been polled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskYield;

#[async_trait]
impl Scheduler for TaskYield {
    async fn yield_turn(&self) {
        tokio::task::yield_now().await;
    }
}

/// Yield by sleeping on a tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerYield {
    delay: Duration,
}

impl TimerYield {
    /// Timer yield with the given minimal delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay slept per yield
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Scheduler for TimerYield {
    async fn yield_turn(&self) {
        if self.delay.is_zero() {
            // a zero sleep may complete without suspending
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }
    }
}
