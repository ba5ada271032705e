//! Blog stages: strategy, outline, article, intro regeneration.

use super::{Stage, StageContext, StageName};
use crate::errors::Result;
use crate::model::{BlogBrief, BlogDocument, BlogIdea, BlogOutlineSection};
use crate::normalize::Normalized;
use crate::prompts::{blog, blog_system_instruction, schema};
use async_trait::async_trait;

/// Proposes headline strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogStrategyStage;

#[async_trait]
impl Stage for BlogStrategyStage {
    type Input = BlogBrief;
    type Output = Normalized<Vec<BlogIdea>>;

    fn name(&self) -> StageName {
        StageName::BlogStrategy
    }

    async fn execute(&self, ctx: &StageContext<'_>, brief: &BlogBrief) -> Result<Self::Output> {
        ctx.generate_list(
            self.name(),
            blog::strategy(brief, ctx.year()),
            blog_system_instruction(&brief.language),
            schema::blog_ideas(),
            None,
        )
        .await
    }
}

/// Builds the superset outline, using any research provided.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogOutlineStage;

#[async_trait]
impl Stage for BlogOutlineStage {
    type Input = BlogDocument;
    type Output = Normalized<Vec<BlogOutlineSection>>;

    fn name(&self) -> StageName {
        StageName::BlogOutline
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &BlogDocument) -> Result<Self::Output> {
        ctx.generate_list(
            self.name(),
            blog::outline(doc, ctx.year()),
            blog_system_instruction(&doc.language),
            schema::blog_outline(),
            Some("section"),
        )
        .await
    }
}

/// Writes the full article.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogContentStage;

#[async_trait]
impl Stage for BlogContentStage {
    type Input = BlogDocument;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::BlogContent
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &BlogDocument) -> Result<String> {
        ctx.generate_text(
            self.name(),
            blog::content(doc, ctx.year()),
            blog_system_instruction(&doc.language),
        )
        .await
    }
}

/// Input for [`BlogIntroStage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogIntroRequest {
    /// Article headline.
    pub title: String,
    /// Article text after the intro; truncated before it is sent.
    pub body: String,
    /// Requested voice.
    pub tone: String,
    /// Output language.
    pub language: String,
}

/// Writes a replacement introduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogIntroStage;

#[async_trait]
impl Stage for BlogIntroStage {
    type Input = BlogIntroRequest;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::BlogIntro
    }

    async fn execute(&self, ctx: &StageContext<'_>, input: &BlogIntroRequest) -> Result<String> {
        ctx.generate_text(
            self.name(),
            blog::intro(&input.title, &input.body, &input.tone, &input.language, ctx.year()),
            blog_system_instruction(&input.language),
        )
        .await
    }
}
