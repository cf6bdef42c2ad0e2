//! # async-foreach
//!
//! Three strategies for running a callback over every element of a slice
//! inside an async context.
//!
//! ## Overview
//!
//! | Strategy   | Callback            | Suspends                          |
//! |------------|---------------------|-----------------------------------|
//! | sequential | returns a future    | after every element               |
//! | parallel   | returns a future    | once, after every call was issued |
//! | throttled  | synchronous         | between fixed-size batches        |
//!
//! Invocation order is ascending index order for all three. Only the
//! parallel strategy lets completions overlap.
//!
//! ## Quick Start
//!
//! ```rust
//! use async_foreach::{for_each_parallel, for_each_sequential, for_each_throttled};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ids = vec![1u32, 2, 3];
//!
//! // One at a time, in order
//! for_each_sequential(&ids, |id, _index, _all| async move {
//!     println!("fetching {id}");
//!     Ok::<_, std::io::Error>(())
//! })
//! .await?;
//!
//! // All issued at once, awaited together
//! for_each_parallel(&ids, |id, _index, _all| async move {
//!     println!("fetching {id}");
//!     Ok::<_, std::io::Error>(())
//! })
//! .await?;
//!
//! // Synchronous work, yielding to the runtime every two elements
//! let mut total = 0;
//! for_each_throttled(&ids, 2, |id, _index, _all| total += id).await?;
//! assert_eq!(total, 6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`sequential`]: one future at a time
//! - [`parallel`]: every future in flight at once
//! - [`throttled`]: synchronous batches separated by scheduler yields
//! - [`plan`]: batch size validation and partition arithmetic
//! - [`scheduler`]: the yield primitive used between batches
//! - [`config`]: serde configuration for throttled runs
//! - [`ext`]: the same operations as methods on slices

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use thiserror::Error;

/// Result type for structural failures
pub type Result<T> = std::result::Result<T, ForEachError>;

/// Structural errors raised by the runners themselves.
///
/// Failures produced by a callback are never wrapped in this type; each
/// runner hands them back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForEachError {
    /// Batch size was zero, negative, non-numeric or out of range
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(String),

    /// Throttle configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Serde configuration for throttled runs
pub mod config;

/// Opt-in extension methods on slices
pub mod ext;

/// Fully concurrent iteration
pub mod parallel;

/// Batch size validation and partitioning
pub mod plan;

/// Cooperative yield primitives
pub mod scheduler;

/// Strictly ordered iteration
pub mod sequential;

/// Batched synchronous iteration with yields
pub mod throttled;

pub use config::{ThrottleConfig, YieldMode};
pub use ext::ForEachAsyncExt;
pub use parallel::for_each_parallel;
pub use plan::{BatchPlan, BatchSize};
pub use scheduler::{Scheduler, TaskYield, TimerYield};
pub use sequential::for_each_sequential;
pub use throttled::{for_each_throttled, try_for_each_throttled, ThrottledRunner};
