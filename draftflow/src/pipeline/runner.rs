//! Runs one stage with events and logging around it.

use crate::errors::Result;
use crate::events::{stage_failure_payload, stage_payload, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED};
use crate::observability::StageTimer;
use crate::session::SessionContext;
use super::WorkflowState;
use crate::stages::Stage;
use tracing::{info, warn};

/// Executes `stage` once with a fresh credential snapshot.
pub(crate) async fn run_stage<S: Stage>(
    session: &SessionContext,
    workflow: &'static str,
    stage: &S,
    input: &S::Input,
) -> Result<S::Output> {
    let name = stage.name();
    let ctx = session.stage_context();
    let events = ctx.events;

    events.emit(STAGE_STARTED, Some(stage_payload(workflow, name))).await;
    let timer = StageTimer::start(name);

    match stage.execute(&ctx, input).await {
        Ok(output) => {
            info!(workflow, stage = %name, duration_ms = timer.elapsed_ms(), "Stage completed");
            events.emit(STAGE_COMPLETED, Some(stage_payload(workflow, name))).await;
            Ok(output)
        }
        Err(err) => {
            warn!(workflow, stage = %name, duration_ms = timer.elapsed_ms(), error = %err, "Stage failed");
            events
                .emit(STAGE_FAILED, Some(stage_failure_payload(workflow, name, &err.to_string())))
                .await;
            Err(err)
        }
    }
}

/// Logs a state change.
pub(crate) fn log_transition(workflow: &'static str, from: WorkflowState, to: WorkflowState) {
    if from != to {
        info!(workflow, from = %from, to = %to, "Workflow transition");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DraftflowError;
    use crate::events::CollectingEventSink;
    use crate::stages::{AudienceRequest, AudienceSuggestionStage};
    use crate::testing::{session_with, ScriptedProvider};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stage_events_reach_context_sink() {
        let provider = Arc::new(ScriptedProvider::new().with_text(r#"["Students"]"#));
        let sink = Arc::new(CollectingEventSink::new());
        let session = session_with(provider).with_event_sink(sink.clone());
        let request = AudienceRequest::new("Coffee", "English");

        run_stage(&session, "blog", &AudienceSuggestionStage, &request).await.unwrap();
        let err = run_stage(&session, "blog", &AudienceSuggestionStage, &request).await.unwrap_err();

        assert!(matches!(err, DraftflowError::GenerationFailed { .. }));
        assert_eq!(
            sink.stage_trail(),
            vec![
                (STAGE_STARTED.to_string(), "audience_suggestion".to_string()),
                (STAGE_COMPLETED.to_string(), "audience_suggestion".to_string()),
                (STAGE_STARTED.to_string(), "audience_suggestion".to_string()),
                (STAGE_FAILED.to_string(), "audience_suggestion".to_string()),
            ]
        );
    }
}
