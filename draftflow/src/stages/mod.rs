//! Stage executors.
//!
//! A stage issues exactly one provider request and turns the reply into one
//! typed result. Stages never touch the credential pool or the working
//! document: they read their input and return output for the pipeline to
//! merge.

mod audience;
mod blog;
pub mod intro_patch;
mod script;

pub use audience::{AudienceRequest, AudienceSuggestionStage};
pub use blog::{BlogContentStage, BlogIntroRequest, BlogIntroStage, BlogOutlineStage, BlogStrategyStage};
pub use script::{BodyStage, IntroStage, OutroStage, PackagingStage, ScriptOutlineStage};

use crate::config::GenerationConfig;
use crate::errors::{DraftflowError, Result};
use crate::events::EventSink;
use crate::normalize::{finalize_text, parse_structured_list, Normalized};
use crate::observability::StageTimer;
use crate::provider::{ClientFactory, GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Identifies a stage in errors, events and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    /// Script stage 1: packaging ideas.
    Packaging,
    /// Script stage 2: outline points.
    ScriptOutline,
    /// Script hook draft.
    Intro,
    /// Script body draft.
    Body,
    /// Script outro draft.
    Outro,
    /// Blog stage 1: headline strategies.
    BlogStrategy,
    /// Blog stage 2: superset outline.
    BlogOutline,
    /// Blog stage 3: the full article.
    BlogContent,
    /// Blog intro regeneration.
    BlogIntro,
    /// Advisory audience suggestions.
    AudienceSuggestion,
}

impl StageName {
    /// Snake-case name used in logs and events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Packaging => "packaging",
            Self::ScriptOutline => "script_outline",
            Self::Intro => "intro",
            Self::Body => "body",
            Self::Outro => "outro",
            Self::BlogStrategy => "blog_strategy",
            Self::BlogOutline => "blog_outline",
            Self::BlogContent => "blog_content",
            Self::BlogIntro => "blog_intro",
            Self::AudienceSuggestion => "audience_suggestion",
        }
    }

    /// Advisory stages never block a workflow.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::AudienceSuggestion)
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a stage needs for one invocation.
///
/// `secrets` is the active credential set captured when the context was
/// built; later pool edits do not affect it.
pub struct StageContext<'a> {
    /// Builds one client per remote call.
    pub factory: &'a ClientFactory,
    /// Enabled secrets captured for this invocation.
    pub secrets: Vec<String>,
    /// Generation settings.
    pub config: &'a GenerationConfig,
    /// Sink for stage events.
    pub events: &'a dyn EventSink,
}

impl Debug for StageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageContext")
            .field("active_credentials", &self.secrets.len())
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl<'a> StageContext<'a> {
    /// Creates a context over a secrets snapshot.
    #[must_use]
    pub fn new(
        factory: &'a ClientFactory,
        secrets: Vec<String>,
        config: &'a GenerationConfig,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            factory,
            secrets,
            config,
            events,
        }
    }

    /// Prompt year from config.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.config.current_year
    }

    /// Fails with `MissingCredential` if no remote call could be made.
    pub fn ensure_credential(&self) -> Result<()> {
        if self.factory.has_credential(&self.secrets) {
            Ok(())
        } else {
            Err(DraftflowError::MissingCredential)
        }
    }

    fn request(&self, prompt: String, system_instruction: String) -> GenerateRequest {
        GenerateRequest::new(self.config.model.clone(), prompt)
            .with_system_instruction(system_instruction)
    }

    async fn call(&self, stage: StageName, request: &GenerateRequest) -> Result<GenerateResponse> {
        let client = self.factory.build_client(&self.secrets)?;
        let timer = StageTimer::start(stage);
        debug!(
            stage = %stage,
            model = %request.model,
            structured = request.is_structured(),
            "Sending generation request"
        );

        match client.generate(request).await {
            Ok(response) => {
                debug!(
                    stage = %stage,
                    duration_ms = timer.elapsed_ms(),
                    chars = response.text.len(),
                    citations = response.citations.len(),
                    "Generation request completed"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(
                    stage = %stage,
                    duration_ms = timer.elapsed_ms(),
                    fingerprint = %client.fingerprint(),
                    error = %err,
                    "Generation request failed"
                );
                Err(DraftflowError::generation_failed(stage, err.to_string()))
            }
        }
    }

    /// Free-text call. Grounded when the config enables web grounding.
    pub async fn generate_text(
        &self,
        stage: StageName,
        prompt: String,
        system_instruction: String,
    ) -> Result<String> {
        let mut request = self.request(prompt, system_instruction);
        if self.config.web_grounding {
            request = request.with_web_grounding();
        }
        let response = self.call(stage, &request).await?;
        Ok(finalize_text(&response.text, &response.citations))
    }

    /// Structured list call, normalized softly.
    pub async fn generate_list<T: DeserializeOwned>(
        &self,
        stage: StageName,
        prompt: String,
        system_instruction: String,
        schema: serde_json::Value,
        id_prefix: Option<&str>,
    ) -> Result<Normalized<Vec<T>>> {
        let request = self.request(prompt, system_instruction).with_schema(schema);
        let response = self.call(stage, &request).await?;
        Ok(parse_structured_list(&response.text, id_prefix))
    }
}

/// A single generation step.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// What the stage reads.
    type Input: Send + Sync;
    /// What the stage produces.
    type Output: Send;

    fn name(&self) -> StageName;

    /// Runs the stage once. Provider failures surface as
    /// [`DraftflowError::GenerationFailed`] naming this stage.
    async fn execute(&self, ctx: &StageContext<'_>, input: &Self::Input) -> Result<Self::Output>;
}
