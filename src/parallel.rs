//! Fully concurrent async iteration
//!
//! Every callback is invoked up front, in index order, and the resulting
//! futures are then driven together on the caller's task. Nothing is
//! spawned, so "parallel" means overlapping waits rather than threads.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, instrument, trace};

/// Run `callback` over `items` with every future in flight at once.
///
/// The callback is invoked for indices `0..len` in ascending order before
/// any future is polled. The run then waits until all of them have settled.
///
/// # Errors
///
/// Returns the first `Err` in completion order, unchanged. Futures still
/// pending at that moment are awaited and their results discarded, so the
/// call never returns while work it issued is in flight. Dropping the
/// returned future drops every pending unit of work with it.
#[instrument(skip_all, fields(len = items.len()))]
pub async fn for_each_parallel<'a, T, F, Fut, E>(items: &'a [T], mut callback: F) -> Result<(), E>
where
    F: FnMut(&'a T, usize, &'a [T]) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let mut in_flight: FuturesUnordered<_> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let work = callback(item, index, items);
            async move { (index, work.await) }
        })
        .collect();

    debug!(issued = in_flight.len(), "Awaiting parallel units of work");

    let mut first_error = None;
    let mut failed = 0usize;
    while let Some((index, result)) = in_flight.next().await {
        match result {
            Ok(()) => trace!(index, "Unit of work completed"),
            Err(e) => {
                failed += 1;
                trace!(index, "Unit of work failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => {
            debug!(failed, "Parallel run failed");
            Err(e)
        }
        None => {
            debug!("Parallel run completed");
            Ok(())
        }
    }
}
