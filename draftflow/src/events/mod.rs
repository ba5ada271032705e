//! Progress events emitted while stages run.
//!
//! Pipelines report every stage transition to the session's [`EventSink`],
//! so a caller can render partial progress while a drafting burst is still
//! in flight.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use crate::stages::StageName;
use serde_json::{json, Value};

/// Emitted when a stage begins.
pub const STAGE_STARTED: &str = "stage.started";
/// Emitted when a stage produced a result (including an empty one).
pub const STAGE_COMPLETED: &str = "stage.completed";
/// Emitted when a stage failed.
pub const STAGE_FAILED: &str = "stage.failed";

/// Builds the payload shared by all stage events.
#[must_use]
pub fn stage_payload(workflow: &str, stage: StageName) -> Value {
    json!({
        "workflow": workflow,
        "stage": stage.as_str(),
    })
}

/// Stage payload with an error message.
#[must_use]
pub fn stage_failure_payload(workflow: &str, stage: StageName, error: &str) -> Value {
    json!({
        "workflow": workflow,
        "stage": stage.as_str(),
        "error": error,
    })
}
