//! Batched synchronous iteration with cooperative yields
//!
//! Callbacks run synchronously, a batch at a time. Between two batches the
//! run yields to the runtime once, so a long slice cannot monopolize the
//! scheduler. No yield follows the last batch, and a slice that fits in a
//! single batch never yields at all.

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::config::ThrottleConfig;
use crate::plan::{BatchPlan, BatchSize};
use crate::scheduler::{Scheduler, TaskYield};
use crate::{ForEachError, Result};

/// Reusable throttled runner
#[derive(Clone)]
pub struct ThrottledRunner {
    batch_size: BatchSize,
    scheduler: Arc<dyn Scheduler>,
}

impl std::fmt::Debug for ThrottledRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottledRunner")
            .field("batch_size", &self.batch_size)
            .field("scheduler", &"dyn Scheduler")
            .finish()
    }
}

impl ThrottledRunner {
    /// Create a runner yielding through [`TaskYield`]
    pub fn new(batch_size: BatchSize) -> Self {
        Self {
            batch_size,
            scheduler: Arc::new(TaskYield),
        }
    }

    /// Create a runner from a raw `iterations` count
    pub fn with_iterations(iterations: usize) -> Result<Self> {
        Ok(Self::new(BatchSize::new(iterations)?))
    }

    /// Create a runner from configuration
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            scheduler: config.yield_mode.scheduler(),
        }
    }

    /// Replace the yield primitive
    pub fn with_scheduler<S>(mut self, scheduler: S) -> Self
    where
        S: Scheduler + 'static,
    {
        self.scheduler = Arc::new(scheduler);
        self
    }

    /// Elements per batch
    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    /// Run an infallible callback over `items`
    pub async fn run<'a, T, F>(&self, items: &'a [T], mut callback: F)
    where
        F: FnMut(&'a T, usize, &'a [T]),
    {
        let outcome = self
            .try_run(items, |item, index, all| {
                callback(item, index, all);
                Ok::<(), Infallible>(())
            })
            .await;
        match outcome {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Run a fallible callback over `items`.
    ///
    /// The first `Err` aborts the current batch and the whole run and is
    /// returned unchanged.
    #[instrument(skip_all, fields(len = items.len(), batch_size = self.batch_size.get()))]
    pub async fn try_run<'a, T, F, E>(
        &self,
        items: &'a [T],
        mut callback: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&'a T, usize, &'a [T]) -> std::result::Result<(), E>,
    {
        let plan = BatchPlan::new(items.len(), self.batch_size);
        let batches = plan.batch_count();
        let multiple = plan.is_multi_batch();
        debug!(batches, yields = plan.yield_count(), "Starting throttled run");

        for (batch, range) in plan.ranges().enumerate() {
            trace!(batch, start = range.start, end = range.end, "Running batch");
            for index in range {
                if let Err(e) = callback(&items[index], index, items) {
                    debug!(batch, index, "Throttled run stopped by callback failure");
                    return Err(e);
                }
            }

            if multiple && batch + 1 < batches {
                self.scheduler.yield_turn().await;
            }
        }

        debug!("Throttled run completed");
        Ok(())
    }
}

/// Run a synchronous `callback` over `items` in batches of `iterations`,
/// yielding to the runtime between batches.
///
/// # Errors
///
/// [`ForEachError::InvalidBatchSize`] when `iterations` is zero. Nothing is
/// visited in that case.
pub async fn for_each_throttled<'a, T, F>(
    items: &'a [T],
    iterations: usize,
    callback: F,
) -> Result<()>
where
    F: FnMut(&'a T, usize, &'a [T]),
{
    let runner = ThrottledRunner::with_iterations(iterations)?;
    runner.run(items, callback).await;
    Ok(())
}

/// Fallible variant of [`for_each_throttled`].
///
/// A batch size failure is converted through `E::from`; callback errors are
/// returned as they are.
pub async fn try_for_each_throttled<'a, T, F, E>(
    items: &'a [T],
    iterations: usize,
    callback: F,
) -> std::result::Result<(), E>
where
    F: FnMut(&'a T, usize, &'a [T]) -> std::result::Result<(), E>,
    E: From<ForEachError>,
{
    let runner = ThrottledRunner::with_iterations(iterations)?;
    runner.try_run(items, callback).await
}
