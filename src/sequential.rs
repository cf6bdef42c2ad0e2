//! Strictly ordered async iteration
//!
//! Each element's future is awaited to completion before the callback is
//! invoked for the next one. Use this when callbacks touch shared state and
//! must not interleave.

use std::future::Future;

use tracing::{debug, instrument, trace};

/// Run `callback` over `items` one element at a time.
///
/// The callback receives the element, its index and the whole slice. The
/// first `Err` stops the run and is returned unchanged; later elements are
/// never visited.
///
/// ```rust
/// # async fn example() {
/// use async_foreach::for_each_sequential;
///
/// let words = ["a", "b", "c"];
/// let mut seen = Vec::new();
/// for_each_sequential(&words, |word, index, _| {
///     seen.push((index, *word));
///     async { Ok::<_, std::convert::Infallible>(()) }
/// })
/// .await
/// .unwrap();
/// assert_eq!(seen, vec![(0, "a"), (1, "b"), (2, "c")]);
/// # }
/// ```
#[instrument(skip_all, fields(len = items.len()))]
pub async fn for_each_sequential<'a, T, F, Fut, E>(items: &'a [T], mut callback: F) -> Result<(), E>
where
    F: FnMut(&'a T, usize, &'a [T]) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for (index, item) in items.iter().enumerate() {
        trace!(index, "Awaiting element");
        if let Err(e) = callback(item, index, items).await {
            debug!(index, "Sequential run stopped by callback failure");
            return Err(e);
        }
    }

    debug!("Sequential run completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_visits_in_order() {
        let log = RefCell::new(Vec::new());
        let items = vec![10, 20, 30];

        let result: Result<(), String> = for_each_sequential(&items, |item, index, all| {
            assert_eq!(all.len(), 3);
            log.borrow_mut().push((index, *item));
            async { Ok(()) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(log.into_inner(), vec![(0, 10), (1, 20), (2, 30)]);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let log = RefCell::new(Vec::new());
        let items = [1, 2, 3, 4];

        let result = for_each_sequential(&items, |item, index, _| {
            log.borrow_mut().push(index);
            let item = *item;
            async move {
                if item == 2 {
                    Err(format!("bad item {}", item))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(result, Err("bad item 2".to_string()));
        assert_eq!(log.into_inner(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_empty_slice() {
        let items: [u8; 0] = [];
        let mut calls = 0;
        let result: Result<(), ()> = for_each_sequential(&items, |_, _, _| {
            calls += 1;
            async { Ok(()) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls, 0);
    }
}
