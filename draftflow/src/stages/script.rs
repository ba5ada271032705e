//! Video script stages: packaging, outline, intro, body, outro.

use super::{Stage, StageContext, StageName};
use crate::errors::Result;
use crate::model::{OutlinePoint, PackagingIdea, ScriptBrief, ScriptDocument};
use crate::normalize::Normalized;
use crate::prompts::{schema, script, script_system_instruction};
use async_trait::async_trait;

/// Proposes title/thumbnail/angle candidates from the brief.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackagingStage;

#[async_trait]
impl Stage for PackagingStage {
    type Input = ScriptBrief;
    type Output = Normalized<Vec<PackagingIdea>>;

    fn name(&self) -> StageName {
        StageName::Packaging
    }

    async fn execute(&self, ctx: &StageContext<'_>, brief: &ScriptBrief) -> Result<Self::Output> {
        ctx.generate_list(
            self.name(),
            script::packaging(brief, ctx.year()),
            script_system_instruction(&brief.language),
            schema::packaging(),
            None,
        )
        .await
    }
}

/// Builds the outline for the selected packaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptOutlineStage;

#[async_trait]
impl Stage for ScriptOutlineStage {
    type Input = ScriptDocument;
    type Output = Normalized<Vec<OutlinePoint>>;

    fn name(&self) -> StageName {
        StageName::ScriptOutline
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &ScriptDocument) -> Result<Self::Output> {
        ctx.generate_list(
            self.name(),
            script::outline(doc, ctx.year()),
            script_system_instruction(&doc.language),
            schema::script_outline(),
            Some("point"),
        )
        .await
    }
}

/// Drafts the intro hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroStage;

#[async_trait]
impl Stage for IntroStage {
    type Input = ScriptDocument;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::Intro
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &ScriptDocument) -> Result<String> {
        ctx.generate_text(
            self.name(),
            script::intro(doc, ctx.year()),
            script_system_instruction(&doc.language),
        )
        .await
    }
}

/// Drafts the body from `intro_script` and the outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyStage;

#[async_trait]
impl Stage for BodyStage {
    type Input = ScriptDocument;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::Body
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &ScriptDocument) -> Result<String> {
        ctx.generate_text(
            self.name(),
            script::body(doc, ctx.year()),
            script_system_instruction(&doc.language),
        )
        .await
    }
}

/// Drafts the outro.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutroStage;

#[async_trait]
impl Stage for OutroStage {
    type Input = ScriptDocument;
    type Output = String;

    fn name(&self) -> StageName {
        StageName::Outro
    }

    async fn execute(&self, ctx: &StageContext<'_>, doc: &ScriptDocument) -> Result<String> {
        ctx.generate_text(
            self.name(),
            script::outro(doc, ctx.year()),
            script_system_instruction(&doc.language),
        )
        .await
    }
}
