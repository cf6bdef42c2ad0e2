//! Extension methods on slices
//!
//! Bring [`ForEachAsyncExt`] into scope to call the runners as methods on
//! any slice, `Vec` or array. Each method forwards to its free function.

use std::future::Future;

use crate::ForEachError;

/// The iteration strategies as slice methods
///
/// ```rust
/// # async fn example() -> Result<(), async_foreach::ForEachError> {
/// use async_foreach::ForEachAsyncExt;
///
/// let mut sum = 0;
/// vec![1, 2, 3].for_each_throttled(2, |n, _, _| sum += n).await?;
/// assert_eq!(sum, 6);
/// # Ok(())
/// # }
/// ```
pub trait ForEachAsyncExt<T> {
    /// See [`crate::for_each_sequential`]
    fn for_each_sequential<'a, F, Fut, E>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Fut,
        Fut: Future<Output = Result<(), E>>;

    /// See [`crate::for_each_parallel`]
    fn for_each_parallel<'a, F, Fut, E>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Fut,
        Fut: Future<Output = Result<(), E>>;

    /// See [`crate::for_each_throttled`]
    fn for_each_throttled<'a, F>(
        &'a self,
        iterations: usize,
        callback: F,
    ) -> impl Future<Output = Result<(), ForEachError>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]);

    /// See [`crate::try_for_each_throttled`]
    fn try_for_each_throttled<'a, F, E>(
        &'a self,
        iterations: usize,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Result<(), E>,
        E: From<ForEachError>;
}

impl<T> ForEachAsyncExt<T> for [T] {
    fn for_each_sequential<'a, F, Fut, E>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        crate::sequential::for_each_sequential(self, callback)
    }

    fn for_each_parallel<'a, F, Fut, E>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        crate::parallel::for_each_parallel(self, callback)
    }

    fn for_each_throttled<'a, F>(
        &'a self,
        iterations: usize,
        callback: F,
    ) -> impl Future<Output = Result<(), ForEachError>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]),
    {
        crate::throttled::for_each_throttled(self, iterations, callback)
    }

    fn try_for_each_throttled<'a, F, E>(
        &'a self,
        iterations: usize,
        callback: F,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: 'a,
        F: FnMut(&'a T, usize, &'a [T]) -> Result<(), E>,
        E: From<ForEachError>,
    {
        crate::throttled::try_for_each_throttled(self, iterations, callback)
    }
}
