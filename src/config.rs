//! Configuration for throttled runs

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::plan::BatchSize;
use crate::scheduler::{Scheduler, TaskYield, TimerYield};
use crate::{ForEachError, Result};

/// How a throttled run yields between batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldMode {
    /// Reschedule the task behind other ready work
    #[default]
    Task,

    /// Sleep on a runtime timer
    Timer {
        /// Minimal delay in milliseconds
        #[serde(default)]
        delay_ms: u64,
    },
}

impl YieldMode {
    /// Scheduler implementing this mode
    pub fn scheduler(&self) -> Arc<dyn Scheduler> {
        match *self {
            YieldMode::Task => Arc::new(TaskYield),
            YieldMode::Timer { delay_ms } => {
                Arc::new(TimerYield::new(Duration::from_millis(delay_ms)))
            }
        }
    }
}

/// Throttled run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Elements processed synchronously per batch
    pub batch_size: BatchSize,

    /// Yield primitive used between batches
    pub yield_mode: YieldMode,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            batch_size: BatchSize::default(),
            yield_mode: YieldMode::Task,
        }
    }
}

impl ThrottleConfig {
    /// Configuration with the given batch size and task yields
    pub fn new(batch_size: BatchSize) -> Self {
        Self {
            batch_size,
            ..Default::default()
        }
    }

    /// Set the yield mode
    pub fn with_yield_mode(mut self, yield_mode: YieldMode) -> Self {
        self.yield_mode = yield_mode;
        self
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// A bad `batch_size` fails with [`ForEachError::InvalidBatchSize`]; any
    /// other malformed input fails with [`ForEachError::InvalidConfig`].
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ForEachError::InvalidConfig(e.to_string()))?;
        if let Some(raw) = doc.get("batch_size") {
            BatchSize::try_from(raw)?;
        }
        serde_json::from_value(doc).map_err(|e| ForEachError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ThrottleConfig::default();
        assert_eq!(config.batch_size.get(), 100);
        assert_eq!(config.yield_mode, YieldMode::Task);
    }

    #[test]
    fn test_from_json() {
        let config = ThrottleConfig::from_json(
            r#"{"batch_size": 8, "yield_mode": {"timer": {"delay_ms": 2}}}"#,
        )
        .unwrap();
        assert_eq!(config.batch_size.get(), 8);
        assert_eq!(config.yield_mode, YieldMode::Timer { delay_ms: 2 });

        let config = ThrottleConfig::from_json(r#"{"yield_mode": "task"}"#).unwrap();
        assert_eq!(config, ThrottleConfig::default());

        let config = ThrottleConfig::from_json("{}").unwrap();
        assert_eq!(config, ThrottleConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_batch_size() {
        for doc in [
            r#"{"batch_size": 0}"#,
            r#"{"batch_size": -1}"#,
            r#"{"batch_size": "many"}"#,
            r#"{"batch_size": 2.5}"#,
        ] {
            let err = ThrottleConfig::from_json(doc).unwrap_err();
            assert!(matches!(err, ForEachError::InvalidBatchSize(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        for doc in [
            "not json",
            "[8]",
            r#"{"batch_size": 8, "yield_mode": "sometimes"}"#,
            r#"{"yield_mode": {"timer": {"delay_ms": -5}}}"#,
        ] {
            let err = ThrottleConfig::from_json(doc).unwrap_err();
            assert!(matches!(err, ForEachError::InvalidConfig(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_round_trip() {
        let config = ThrottleConfig::new(BatchSize::new(3).unwrap())
            .with_yield_mode(YieldMode::Timer { delay_ms: 1 });
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ThrottleConfig::from_json(&json).unwrap(), config);
    }
}
