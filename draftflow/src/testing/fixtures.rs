//! Fixture builders.

use std::sync::Arc;

use super::ScriptedProvider;
use crate::config::GenerationConfig;
use crate::model::{BlogOutlineSection, OutlinePoint, PackagingIdea, ScriptBrief, ScriptDocument};
use crate::session::SessionContext;

/// A session over `provider` with one enabled credential and a fixed year.
#[must_use]
pub fn session_with(provider: Arc<ScriptedProvider>) -> SessionContext {
    let session = SessionContext::new(GenerationConfig::new().with_year(2025), provider);
    session.add_credential("test", "test-key");
    session
}

/// Three outline points with distinct ids.
#[must_use]
pub fn sample_outline() -> Vec<OutlinePoint> {
    ["Hook", "Method", "Payoff"]
        .iter()
        .enumerate()
        .map(|(i, headline)| OutlinePoint {
            what: format!("{headline} what"),
            why: format!("{headline} why"),
            how: format!("{headline} how"),
            ..OutlinePoint::new(format!("point-{i}"), *headline)
        })
        .collect()
}

/// A packaged script with an outline and no drafts.
#[must_use]
pub fn sample_script_document() -> ScriptDocument {
    let brief = ScriptBrief::new("Rust async", "Backend developers").with_cta("the newsletter");
    let mut doc = ScriptDocument::from_brief(&brief);
    doc.apply_idea(&PackagingIdea {
        title: "Async Rust in 10 Minutes".to_string(),
        thumbnail: "Crab with a stopwatch".to_string(),
        video_idea: "Async feels like magic".to_string(),
        expectations: "A clear mental model".to_string(),
        psychology: "Time-boxed promise".to_string(),
    });
    doc.outline = sample_outline();
    doc
}

/// Two blog outline sections.
#[must_use]
pub fn sample_sections() -> Vec<BlogOutlineSection> {
    vec![
        BlogOutlineSection::new("section-0", "What is cold brew").with_key_points(["Definition", "History"]),
        BlogOutlineSection::new("section-1", "FAQ").with_key_points(["Is it stronger?"]),
    ]
}
