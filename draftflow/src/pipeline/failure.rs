//! Continue-on-failure bookkeeping for drafting bursts.
//!
//! A failed draft stage leaves its slot empty and the burst moves on. The
//! collector records what happened so the caller gets a full report once
//! the burst settles.

use crate::errors::DraftflowError;
use crate::stages::StageName;
use crate::utils::{now_utc, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record of a failed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Stage that failed.
    pub stage: StageName,
    /// Error message.
    pub error: String,
    /// Error kind, e.g. `GenerationFailed`.
    pub error_type: String,
    /// When the failure was recorded.
    pub timestamp: Timestamp,
}

impl FailureRecord {
    /// Creates a record stamped now.
    #[must_use]
    pub fn new(stage: StageName, error: impl Into<String>) -> Self {
        Self {
            stage,
            error: error.into(),
            error_type: "Error".to_string(),
            timestamp: now_utc(),
        }
    }

    /// Builds a record from a stage error.
    #[must_use]
    pub fn from_error(stage: StageName, err: &DraftflowError) -> Self {
        Self::new(stage, err.to_string()).with_error_type(err.kind())
    }

    /// Sets the error type.
    #[must_use]
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }
}

/// Outcome of one drafting burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftReport {
    /// Stages that produced text, in execution order.
    pub completed: Vec<StageName>,
    /// Stages that failed, in execution order.
    pub failures: Vec<FailureRecord>,
}

impl DraftReport {
    /// Whether any stage failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True if `stage` failed in this burst.
    #[must_use]
    pub fn failed(&self, stage: StageName) -> bool {
        self.failures.iter().any(|f| f.stage == stage)
    }

    /// Stages that ran, successful or not.
    #[must_use]
    pub fn total_stages(&self) -> usize {
        self.completed.len() + self.failures.len()
    }

    /// Share of stages that produced text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        let total = self.total_stages();
        if total == 0 {
            return 0.0;
        }
        self.completed.len() as f64 / total as f64
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("total_stages".to_string(), serde_json::json!(self.total_stages()));
        map.insert("completed_stages".to_string(), serde_json::json!(self.completed));
        map.insert("success_rate".to_string(), serde_json::json!(self.success_rate()));
        map.insert(
            "failures".to_string(),
            serde_json::json!(self
                .failures
                .iter()
                .map(|f| serde_json::json!({
                    "stage": f.stage.as_str(),
                    "error": f.error,
                    "error_type": f.error_type,
                    "timestamp": f.timestamp.to_rfc3339(),
                }))
                .collect::<Vec<_>>()),
        );
        map
    }
}

/// Collects completions and failures while a burst runs.
#[derive(Debug, Default)]
pub struct FailureCollector {
    completed: Vec<StageName>,
    failures: Vec<FailureRecord>,
}

impl FailureCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful stage.
    pub fn record_completion(&mut self, stage: StageName) {
        self.completed.push(stage);
    }

    /// Records a failed stage.
    pub fn record_failure(&mut self, record: FailureRecord) {
        self.failures.push(record);
    }

    /// Whether `stage` failed.
    #[must_use]
    pub fn has_failed(&self, stage: StageName) -> bool {
        self.failures.iter().any(|f| f.stage == stage)
    }

    /// Finishes collection.
    #[must_use]
    pub fn into_report(self) -> DraftReport {
        DraftReport {
            completed: self.completed,
            failures: self.failures,
        }
    }
}
