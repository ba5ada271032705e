//! Workflow and sub-stage states.

use crate::stages::StageName;
use serde::{Deserialize, Serialize};

/// Position of a workflow in its fixed stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Brief entered; candidate ideas may be generated.
    #[default]
    Strategy,
    /// Blog only: idea chosen, research slots open.
    Research,
    /// Outline may be generated and edited.
    Outline,
    /// Draft stages are running.
    Drafting,
    /// Every draft stage produced text or failed.
    Complete,
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strategy => write!(f, "strategy"),
            Self::Research => write!(f, "research"),
            Self::Outline => write!(f, "outline"),
            Self::Drafting => write!(f, "drafting"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Status of one draft stage within a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStageStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// In flight.
    Running,
    /// Produced text.
    Ok,
    /// Failed; its text is empty.
    Failed,
}

impl SubStageStatus {
    /// True once the sub-stage has an outcome.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ok | Self::Failed)
    }
}

impl std::fmt::Display for SubStageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Ok => write!(f, "ok"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Per-stage status of the current drafting burst.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftProgress {
    entries: Vec<(StageName, SubStageStatus)>,
}

impl DraftProgress {
    /// All stages pending.
    #[must_use]
    pub fn new(stages: &[StageName]) -> Self {
        Self {
            entries: stages.iter().map(|s| (*s, SubStageStatus::Pending)).collect(),
        }
    }

    /// Status of `stage`, if it is part of this burst.
    #[must_use]
    pub fn status(&self, stage: StageName) -> Option<SubStageStatus> {
        self.entries.iter().find(|(s, _)| *s == stage).map(|(_, status)| *status)
    }

    /// Updates the status of `stage`, if tracked.
    pub fn set(&mut self, stage: StageName, status: SubStageStatus) {
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == stage) {
            entry.1 = status;
        }
    }

    /// Entries in execution order.
    #[must_use]
    pub fn entries(&self) -> &[(StageName, SubStageStatus)] {
        &self.entries
    }

    /// True when every stage has an outcome. False for an empty burst.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|(_, s)| s.is_settled())
    }

    /// Number of stages that produced text.
    #[must_use]
    pub fn ok_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| *s == SubStageStatus::Ok).count()
    }
}
