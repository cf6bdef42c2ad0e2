//! Batch size validation and partition arithmetic for throttled runs.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ForEachError, Result};

/// Number of elements processed synchronously between two yields.
///
/// Always at least one. Build it from a `usize`, an integer, a JSON number or
/// a string; every other value fails with [`ForEachError::InvalidBatchSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i128", into = "u64")]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    /// Validate a batch size
    pub fn new(iterations: usize) -> Result<Self> {
        NonZeroUsize::new(iterations).map(Self).ok_or_else(|| {
            ForEachError::InvalidBatchSize(format!(
                "iterations must be a positive integer, got {}",
                iterations
            ))
        })
    }

    /// Elements per batch
    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for BatchSize {
    type Error = ForEachError;

    fn try_from(iterations: usize) -> Result<Self> {
        Self::new(iterations)
    }
}

impl TryFrom<i64> for BatchSize {
    type Error = ForEachError;

    fn try_from(iterations: i64) -> Result<Self> {
        Self::try_from(i128::from(iterations))
    }
}

impl TryFrom<i128> for BatchSize {
    type Error = ForEachError;

    fn try_from(iterations: i128) -> Result<Self> {
        let iterations = usize::try_from(iterations).map_err(|_| {
            ForEachError::InvalidBatchSize(format!(
                "iterations must be a positive integer, got {}",
                iterations
            ))
        })?;
        Self::new(iterations)
    }
}

impl TryFrom<&serde_json::Value> for BatchSize {
    type Error = ForEachError;

    /// Only integral JSON numbers are accepted
    fn try_from(raw: &serde_json::Value) -> Result<Self> {
        let integral = match raw {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from)),
            _ => None,
        };
        match integral {
            Some(iterations) => Self::try_from(iterations),
            None => Err(ForEachError::InvalidBatchSize(format!(
                "iterations must be a positive integer, got {}",
                raw
            ))),
        }
    }
}

impl From<BatchSize> for u64 {
    fn from(size: BatchSize) -> Self {
        size.get() as u64
    }
}

impl FromStr for BatchSize {
    type Err = ForEachError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed: i128 = s.trim().parse().map_err(|_| {
            ForEachError::InvalidBatchSize(format!(
                "iterations must be a positive integer, got {:?}",
                s
            ))
        })?;
        Self::try_from(parsed)
    }
}

/// Partition of a sequence of `len` elements into consecutive batches.
///
/// Every batch holds `size` elements except possibly the last. A plan over
/// zero elements has no batches at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    len: usize,
    size: BatchSize,
}

impl BatchPlan {
    /// Plan batches over `len` elements
    pub fn new(len: usize, size: BatchSize) -> Self {
        Self { len, size }
    }

    /// Number of elements covered
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan covers no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements per full batch
    pub fn batch_size(&self) -> BatchSize {
        self.size
    }

    /// `ceil(len / size)`
    pub fn batch_count(&self) -> usize {
        self.len.div_ceil(self.size.get())
    }

    /// Yields between batches; none after the last one
    pub fn yield_count(&self) -> usize {
        self.batch_count().saturating_sub(1)
    }

    /// Whether the run needs more than one batch
    pub fn is_multi_batch(&self) -> bool {
        self.len > self.size.get()
    }

    /// Index ranges of each batch, in ascending order
    pub fn ranges(&self) -> BatchRanges {
        BatchRanges {
            next_start: 0,
            len: self.len,
            size: self.size.get(),
        }
    }
}

impl IntoIterator for BatchPlan {
    type Item = Range<usize>;
    type IntoIter = BatchRanges;

    fn into_iter(self) -> BatchRanges {
        self.ranges()
    }
}

/// Iterator over the `[start, end)` ranges of a [`BatchPlan`]
#[derive(Debug, Clone)]
pub struct BatchRanges {
    next_start: usize,
    len: usize,
    size: usize,
}

impl Iterator for BatchRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next_start >= self.len {
            return None;
        }
        let start = self.next_start;
        // saturating: start + size may overflow for huge batch sizes
        let end = start.saturating_add(self.size).min(self.len);
        self.next_start = end;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.next_start).div_ceil(self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchRanges {}

impl std::iter::FusedIterator for BatchRanges {}
