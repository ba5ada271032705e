//! End-to-end workflow tests over a scripted provider.

use crate::config::GenerationConfig;
use crate::errors::{DraftflowError, ProviderError};
use crate::events::{CollectingEventSink, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED};
use crate::export::{markdown_to_html, script_text, MarkdownFlavor};
use crate::model::{ArtifactKind, BlogBrief, ScriptBrief};
use crate::pipeline::{BlogPipeline, MoveDirection, ScriptPipeline, SubStageStatus, WorkflowState};
use crate::session::SessionContext;
use crate::stages::StageName;
use crate::storage::{History, InMemoryStore};
use crate::testing::{sample_outline, session_with, ScriptedProvider};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const PACKAGING: &str = "Here you go:\n```json\n[{\"title\":\"Async Rust\",\"thumbnail\":\"crab\",\"videoIdea\":\"confusing futures\",\"expectations\":\"clarity\",\"psychology\":\"curiosity\"}]\n```";
const OUTLINE: &str = r#"[{"headline":"Executors","what":"w1","why":"y1","how":"h1"},{"headline":"Pinning","what":"w2","why":"y2","how":"h2"}]"#;

async fn script_at_outline(session: &SessionContext) -> ScriptPipeline {
    let mut pipeline = ScriptPipeline::new();
    pipeline
        .generate_ideas(session, ScriptBrief::new("Rust async", "Developers").with_language("German"))
        .await
        .unwrap();
    pipeline.select_idea(0).unwrap();
    pipeline.generate_outline(session).await.unwrap();
    pipeline
}

#[tokio::test]
async fn test_script_end_to_end() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(PACKAGING)
            .with_text(OUTLINE)
            .with_text("INTRO TEXT")
            .with_text("BODY TEXT")
            .with_text("OUTRO TEXT"),
    );
    let sink = Arc::new(CollectingEventSink::new());
    let session = session_with(provider.clone()).with_event_sink(sink.clone());

    let mut pipeline = script_at_outline(&session).await;
    let ids: Vec<&str> = pipeline.document().outline.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["point-0", "point-1"]);

    let report = pipeline.confirm_outline(&session).await.unwrap();

    assert!(!report.has_failures());
    assert_eq!(pipeline.state(), WorkflowState::Complete);
    assert!(pipeline.document().is_complete());
    assert_eq!(pipeline.progress().ok_count(), 3);

    let requests = provider.requests();
    assert_eq!(requests.len(), 5);
    assert!(requests[3].prompt.contains("- Intro: INTRO TEXT\n"));
    for request in &requests {
        let system = request.system_instruction.as_deref().unwrap_or_default();
        assert!(system.contains("language: German"));
    }

    let text = script_text(pipeline.document());
    assert!(text.starts_with("TITLE: Async Rust\n"));
    assert!(text.contains("=== PART 2: BODY ===\nBODY TEXT\n"));

    let trail: Vec<(String, String)> = sink
        .stage_trail()
        .into_iter()
        .filter(|(_, stage)| stage == "intro" || stage == "body")
        .collect();
    assert_eq!(
        trail,
        vec![
            (STAGE_STARTED.to_string(), "intro".to_string()),
            (STAGE_COMPLETED.to_string(), "intro".to_string()),
            (STAGE_STARTED.to_string(), "body".to_string()),
            (STAGE_COMPLETED.to_string(), "body".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_failed_intro_still_drafts_siblings() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(PACKAGING)
            .with_text(OUTLINE)
            .with_error(ProviderError::status(500, "overloaded"))
            .with_text("BODY TEXT")
            .with_text("OUTRO TEXT"),
    );
    let sink = Arc::new(CollectingEventSink::new());
    let session = session_with(provider.clone()).with_event_sink(sink.clone());
    let mut pipeline = script_at_outline(&session).await;

    let report = pipeline.confirm_outline(&session).await.unwrap();

    assert!(report.failed(StageName::Intro));
    assert_eq!(report.completed, vec![StageName::Body, StageName::Outro]);
    assert_eq!(pipeline.state(), WorkflowState::Complete);
    assert_eq!(pipeline.document().intro_script, "");
    assert_eq!(pipeline.document().body_script, "BODY TEXT");
    assert_eq!(pipeline.progress().status(StageName::Intro), Some(SubStageStatus::Failed));
    assert!(provider.requests()[3].prompt.contains("- Intro: \n"));
    assert_eq!(sink.events_of_type(STAGE_FAILED).len(), 1);
}

#[tokio::test]
async fn test_missing_credential_keeps_outline_state() {
    let provider = Arc::new(ScriptedProvider::new().with_text(PACKAGING).with_text(OUTLINE));
    let session = session_with(provider.clone());
    let mut pipeline = script_at_outline(&session).await;

    for credential in session.credentials() {
        session.remove_credential(&credential.id);
    }

    let err = pipeline.confirm_outline(&session).await.unwrap_err();
    assert!(matches!(err, DraftflowError::MissingCredential));
    assert_eq!(pipeline.state(), WorkflowState::Outline);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_regenerate_outline_after_completion_keeps_drafts() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(PACKAGING)
            .with_text(OUTLINE)
            .with_text("I")
            .with_text("B")
            .with_text("O")
            .with_text(r#"[{"headline":"Fresh"}]"#),
    );
    let session = session_with(provider.clone());
    let mut pipeline = script_at_outline(&session).await;
    pipeline.confirm_outline(&session).await.unwrap();

    pipeline.regenerate_outline(&session).await.unwrap();

    assert_eq!(pipeline.state(), WorkflowState::Outline);
    assert_eq!(pipeline.document().outline.len(), 1);
    assert_eq!(pipeline.document().intro_script, "I");
    assert_eq!(pipeline.document().outro_script, "O");
    assert_eq!(provider.calls(), 6);
}

#[tokio::test]
async fn test_edits_after_completion_then_redraft() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(PACKAGING)
            .with_text(OUTLINE)
            .with_text("I1")
            .with_text("B1")
            .with_text("O1"),
    );
    let session = session_with(provider.clone());
    let mut pipeline = script_at_outline(&session).await;
    pipeline.confirm_outline(&session).await.unwrap();

    pipeline.set_outline(sample_outline()).unwrap();
    pipeline.move_point(0, MoveDirection::Down).unwrap();
    assert_eq!(provider.calls(), 5);

    provider.push_text("I2");
    provider.push_text("B2");
    provider.push_text("O2");
    pipeline.redraft(&session).await.unwrap();

    assert_eq!(pipeline.document().body_script, "B2");
    assert!(provider.requests()[5].prompt.contains("- Method: Method what\n- Hook: Hook what"));
}

#[tokio::test]
async fn test_rotation_uses_only_enabled_credentials() {
    let provider = Arc::new(ScriptedProvider::new());
    let session = SessionContext::new(GenerationConfig::new(), provider.clone());
    let disabled = session.add_credential("old", "disabled-key");
    session.add_credential("a", "key-a");
    session.add_credential("b", "key-b");
    session.set_credential_enabled(&disabled.id, false);

    let mut pipeline = BlogPipeline::new();
    for _ in 0..20 {
        provider.push_text("[\"Readers\"]");
        pipeline.suggest_audiences(&session, "Coffee", "English").await;
    }

    let secrets = provider.secrets();
    assert_eq!(secrets.len(), 20);
    assert!(secrets.iter().all(|s| s == "key-a" || s == "key-b"));
}

#[tokio::test]
async fn test_blog_end_to_end_with_history() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(r#"[{"title":"Cold Brew Guide","seoHook":"intent","targetKeywords":["cold brew"]}]"#)
            .with_text(r#"[{"heading":"What is cold brew","keyPoints":["def"]},{"heading":"FAQ","keyPoints":[]}]"#)
            .with_text("# Cold Brew Guide\n\nOld intro.\n\n## What is cold brew\nIt **is** coffee.\n- steep\n\n## FAQ\nYes.")
            .with_text("Fresh intro."),
    );
    let session = session_with(provider.clone());
    let mut pipeline = BlogPipeline::new();

    pipeline
        .generate_ideas(&session, BlogBrief::new("Cold brew", "Students").with_tone("Friendly"))
        .await
        .unwrap();
    pipeline.select_idea(0).unwrap();
    pipeline.set_research(0, "Competitor article about cold brew").unwrap();
    pipeline.generate_outline(&session).await.unwrap();
    assert_eq!(pipeline.state(), WorkflowState::Outline);
    assert_eq!(pipeline.document().outline[1].id, "section-1");
    assert!(provider.requests()[1].prompt.contains("--- Competitor 1 ---"));

    let report = pipeline.write_article(&session).await.unwrap();
    assert!(!report.has_failures());
    assert_eq!(pipeline.state(), WorkflowState::Complete);

    pipeline.regenerate_intro(&session).await.unwrap();
    let content = pipeline.document().full_content.clone();
    assert!(content.starts_with("# Cold Brew Guide\n\nFresh intro.\n\n## What is cold brew\n"));
    assert!(content.ends_with("## FAQ\nYes."));
    assert!(provider.requests()[3].prompt.contains("Tone: Friendly"));

    let html = markdown_to_html(&content, MarkdownFlavor::Blog);
    assert!(html.contains("<h1>Cold Brew Guide</h1>"));
    assert!(html.contains("<b>is</b>"));

    let history = History::new(InMemoryStore::new());
    history.save(ArtifactKind::Blog, pipeline.to_artifact()).unwrap();
    let saved = history.search(ArtifactKind::Blog, "cold").unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].content, content);
}

#[tokio::test]
async fn test_failed_article_reaches_complete_with_report() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text(r#"[{"title":"T","seoHook":"h","targetKeywords":[]}]"#)
            .with_text(r#"[{"heading":"One"}]"#)
            .with_error(ProviderError::Http("connection reset".to_string())),
    );
    let session = session_with(provider);
    let mut pipeline = BlogPipeline::new();
    pipeline.generate_ideas(&session, BlogBrief::new("t", "a")).await.unwrap();
    pipeline.select_idea(0).unwrap();
    pipeline.generate_outline(&session).await.unwrap();

    let report = pipeline.write_article(&session).await.unwrap();

    assert!(report.failed(StageName::BlogContent));
    assert_eq!(pipeline.state(), WorkflowState::Complete);
    assert!(pipeline.document().full_content.is_empty());

    let err = pipeline.regenerate_intro(&session).await.unwrap_err();
    assert!(matches!(err, DraftflowError::StructureNotFound));
}
