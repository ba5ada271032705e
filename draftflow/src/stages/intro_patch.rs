//! Regenerates only the introduction of a finished article.
//!
//! The article is split at its first second-level heading. Everything from
//! that heading on is kept byte-for-byte; the title line and a freshly
//! generated intro are placed in front of it.

use super::{BlogIntroRequest, BlogIntroStage, Stage, StageContext, StageName};
use crate::errors::{DraftflowError, Result};
use crate::model::BlogDocument;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

static BODY_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s").expect("valid body heading regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s.*$").expect("valid title regex"));

/// Byte offset of the first line starting with `## `.
#[must_use]
pub fn locate_body(content: &str) -> Option<usize> {
    BODY_START_RE.find(content).map(|m| m.start())
}

/// The first top-level heading line, if any.
#[must_use]
pub fn title_line(content: &str) -> Option<&str> {
    TITLE_RE.find(content).map(|m| m.as_str())
}

/// Joins title, intro and preserved body.
#[must_use]
pub fn splice(title: &str, intro: &str, body: &str) -> String {
    format!("{title}\n\n{}\n\n{body}", intro.trim())
}

/// Produces the article with a regenerated intro.
///
/// Fails with [`DraftflowError::StructureNotFound`] before any remote call
/// when the article has no `## ` heading.
pub async fn regenerate_intro(ctx: &StageContext<'_>, doc: &BlogDocument) -> Result<String> {
    let content = doc.full_content.as_str();
    let body_start = locate_body(content).ok_or(DraftflowError::StructureNotFound)?;
    let body = &content[body_start..];
    let title = title_line(content).map_or_else(|| format!("# {}", doc.selected_title), str::to_string);

    let request = BlogIntroRequest {
        title: doc.selected_title.clone(),
        body: body.to_string(),
        tone: doc.tone.clone(),
        language: doc.language.clone(),
    };
    let intro = BlogIntroStage.execute(ctx, &request).await?;

    Ok(splice(&title, &intro, body))
}

/// [`regenerate_intro`] as a stage, producing the replacement article.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroPatchStage;

#[async_trait]
impl Stage for IntroPatchStage {
    type Input = BlogDocument;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::BlogIntro
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &BlogDocument) -> Result<String> {
        regenerate_intro(ctx, doc).await
    }
}
