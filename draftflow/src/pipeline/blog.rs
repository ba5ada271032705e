//! The blog workflow.
//!
//! Strategy → Research → Outline → Drafting → Complete, plus advisory
//! audience suggestions and intro regeneration on a finished article.

use super::editing::{check_index, move_item, remove_item, replace_item, MoveDirection};
use super::failure::{DraftReport, FailureCollector, FailureRecord};
use super::runner::{log_transition, run_stage};
use super::state::{DraftProgress, SubStageStatus, WorkflowState};
use crate::errors::{DraftflowError, Result};
use crate::model::{ArtifactKind, BlogBrief, BlogDocument, BlogIdea, BlogOutlineSection, SavedArtifact, RESEARCH_SLOTS};
use crate::normalize::Normalized;
use crate::session::SessionContext;
use crate::stages::intro_patch::IntroPatchStage;
use crate::storage::{ArtifactStore, History};
use crate::stages::{
    AudienceRequest, AudienceSuggestionStage, BlogContentStage, BlogOutlineStage, BlogStrategyStage, StageName,
};
use tracing::{debug, warn};

const WORKFLOW: &str = "blog";

/// One end-to-end blog run.
#[derive(Debug, Clone, Default)]
pub struct BlogPipeline {
    state: WorkflowState,
    brief: Option<BlogBrief>,
    document: BlogDocument,
    candidates: Vec<BlogIdea>,
    selected: Option<usize>,
    audiences: Vec<String>,
    progress: DraftProgress,
    last_report: Option<DraftReport>,
    saved: bool,
}

impl BlogPipeline {
    /// Starts at the strategy step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The working document.
    #[must_use]
    pub fn document(&self) -> &BlogDocument {
        &self.document
    }

    /// Consumes the pipeline, returning its document.
    #[must_use]
    pub fn into_document(self) -> BlogDocument {
        self.document
    }

    /// Strategies from the last `generate_ideas`.
    #[must_use]
    pub fn candidates(&self) -> &[BlogIdea] {
        &self.candidates
    }

    /// The chosen strategy, if any.
    #[must_use]
    pub fn selected_idea(&self) -> Option<&BlogIdea> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    /// Audience suggestions from the last `suggest_audiences`.
    #[must_use]
    pub fn audiences(&self) -> &[String] {
        &self.audiences
    }

    /// Sub-stage status of the current or last article run.
    #[must_use]
    pub fn progress(&self) -> &DraftProgress {
        &self.progress
    }

    /// Report of the last article run.
    #[must_use]
    pub fn last_report(&self) -> Option<&DraftReport> {
        self.last_report.as_ref()
    }

    /// Snapshot for history.
    #[must_use]
    pub fn to_artifact(&self) -> SavedArtifact {
        SavedArtifact::from_blog(&self.document)
    }

    /// Whether the current article is already in history.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Saves the finished article to `history` once. Returns false without
    /// writing when it was already saved and has not changed since.
    pub fn save_to_history<S: ArtifactStore>(&mut self, history: &History<S>) -> Result<bool> {
        self.require(&[WorkflowState::Complete])?;
        if self.saved {
            debug!(workflow = WORKFLOW, "Article already saved");
            return Ok(false);
        }
        history.save(ArtifactKind::Blog, self.to_artifact())?;
        self.saved = true;
        Ok(true)
    }

    fn set_state(&mut self, to: WorkflowState) {
        log_transition(WORKFLOW, self.state, to);
        self.state = to;
    }

    fn require(&self, accepted: &[WorkflowState]) -> Result<()> {
        if accepted.contains(&self.state) {
            return Ok(());
        }
        let expected = accepted.iter().map(ToString::to_string).collect::<Vec<_>>().join(" or ");
        Err(DraftflowError::invalid_state(WORKFLOW, expected, self.state))
    }

    /// Suggests target audiences for `topic`. Never fails: any error yields
    /// an empty list.
    pub async fn suggest_audiences(&mut self, session: &SessionContext, topic: &str, language: &str) -> Vec<String> {
        let request = AudienceRequest::new(topic, language);
        self.audiences = match run_stage(session, WORKFLOW, &AudienceSuggestionStage, &request).await {
            Ok(suggestions) => suggestions.into_vec(),
            Err(err) => {
                warn!(error = %err, "Audience suggestion skipped");
                Vec::new()
            }
        };
        self.audiences.clone()
    }

    /// Stage 1: headline strategies. Allowed in any state except drafting.
    ///
    /// Only the candidates and the selection are replaced. The document,
    /// research and state stay as they are until a new idea is selected.
    pub async fn generate_ideas(&mut self, session: &SessionContext, brief: BlogBrief) -> Result<Normalized<Vec<BlogIdea>>> {
        self.require(&[
            WorkflowState::Strategy,
            WorkflowState::Research,
            WorkflowState::Outline,
            WorkflowState::Complete,
        ])?;
        let ideas = run_stage(session, WORKFLOW, &BlogStrategyStage, &brief).await?;

        self.brief = Some(brief);
        self.candidates = ideas.clone().into_vec();
        self.selected = None;
        Ok(ideas)
    }

    /// Chooses a strategy and opens the research step.
    ///
    /// The document is rebuilt from the latest brief. Research already
    /// entered is kept; outline and article are cleared.
    pub fn select_idea(&mut self, index: usize) -> Result<()> {
        self.require(&[
            WorkflowState::Strategy,
            WorkflowState::Research,
            WorkflowState::Outline,
            WorkflowState::Complete,
        ])?;
        check_index(index, self.candidates.len())?;

        if let Some(brief) = &self.brief {
            let research = std::mem::take(&mut self.document.competitor_content);
            self.document = BlogDocument::from_brief(brief);
            self.document.competitor_content = research;
        }
        let idea = self.candidates[index].clone();
        self.document.apply_idea(&idea);
        self.document.outline.clear();
        self.document.full_content.clear();
        self.progress = DraftProgress::default();
        self.last_report = None;
        self.saved = false;
        self.selected = Some(index);
        self.set_state(WorkflowState::Research);
        Ok(())
    }

    /// Fills one of the competitor research slots. Blank text clears it.
    pub fn set_research(&mut self, slot: usize, text: impl Into<String>) -> Result<()> {
        self.require(&[WorkflowState::Research, WorkflowState::Outline])?;
        check_index(slot, RESEARCH_SLOTS)?;
        self.document.competitor_content[slot] = text.into();
        Ok(())
    }

    /// Stage 2: builds the outline, moving to the outline step once one
    /// parses. An empty result keeps the current state so the caller can
    /// retry.
    pub async fn generate_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<BlogOutlineSection>>> {
        self.require(&[WorkflowState::Research, WorkflowState::Outline])?;
        self.run_outline(session).await
    }

    /// Re-runs the outline stage after the article was written. The article
    /// is kept until the next `write_article`.
    pub async fn regenerate_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<BlogOutlineSection>>> {
        self.require(&[WorkflowState::Outline, WorkflowState::Complete])?;
        let sections = self.run_outline(session).await?;
        self.set_state(WorkflowState::Outline);
        Ok(sections)
    }

    async fn run_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<BlogOutlineSection>>> {
        let sections = run_stage(session, WORKFLOW, &BlogOutlineStage, &self.document).await?;
        if let Normalized::Parsed(ref items) = sections {
            self.document.outline = items.clone();
            self.set_state(WorkflowState::Outline);
        }
        Ok(sections)
    }

    /// Outline edits are allowed from the outline step and after drafting;
    /// any edit marks the run as unsaved.
    fn begin_edit(&mut self) -> Result<()> {
        self.require(&[WorkflowState::Outline, WorkflowState::Complete])?;
        self.saved = false;
        Ok(())
    }

    /// Replaces one outline section.
    pub fn edit_section(&mut self, index: usize, section: BlogOutlineSection) -> Result<()> {
        self.begin_edit()?;
        replace_item(&mut self.document.outline, index, section)
    }

    /// Moves a section one position up or down. Returns false at either end.
    pub fn move_section(&mut self, index: usize, direction: MoveDirection) -> Result<bool> {
        self.begin_edit()?;
        move_item(&mut self.document.outline, index, direction)
    }

    /// Removes one section.
    pub fn remove_section(&mut self, index: usize) -> Result<BlogOutlineSection> {
        self.begin_edit()?;
        remove_item(&mut self.document.outline, index)
    }

    /// Replaces the whole outline.
    pub fn set_outline(&mut self, sections: Vec<BlogOutlineSection>) -> Result<()> {
        self.begin_edit()?;
        self.document.outline = sections;
        Ok(())
    }

    /// Stage 3: writes the article. Calling it again from `Complete`
    /// rewrites the article from the current outline.
    pub async fn write_article(&mut self, session: &SessionContext) -> Result<DraftReport> {
        self.require(&[WorkflowState::Outline, WorkflowState::Complete])?;
        session.stage_context().ensure_credential()?;

        self.set_state(WorkflowState::Drafting);
        self.progress = DraftProgress::new(&[StageName::BlogContent]);
        self.progress.set(StageName::BlogContent, SubStageStatus::Running);
        let mut collector = FailureCollector::new();

        match run_stage(session, WORKFLOW, &BlogContentStage, &self.document).await {
            Ok(article) => {
                self.document.full_content = article;
                self.saved = false;
                self.progress.set(StageName::BlogContent, SubStageStatus::Ok);
                collector.record_completion(StageName::BlogContent);
            }
            Err(err) => {
                self.document.full_content.clear();
                self.saved = false;
                self.progress.set(StageName::BlogContent, SubStageStatus::Failed);
                collector.record_failure(FailureRecord::from_error(StageName::BlogContent, &err));
            }
        }

        let report = collector.into_report();
        self.last_report = Some(report.clone());
        self.set_state(WorkflowState::Complete);
        Ok(report)
    }

    /// Replaces only the introduction of the finished article.
    ///
    /// On any error the article is left untouched.
    pub async fn regenerate_intro(&mut self, session: &SessionContext) -> Result<()> {
        self.require(&[WorkflowState::Complete])?;
        let updated = run_stage(session, WORKFLOW, &IntroPatchStage, &self.document).await?;
        self.document.full_content = updated;
        self.saved = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use crate::testing::{session_with, ScriptedProvider};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const IDEAS: &str = r#"[{"title":"Cold Brew 2025","seoHook":"h","targetKeywords":["cold brew","coffee"]}]"#;

    async fn at_research(provider: Arc<ScriptedProvider>) -> (SessionContext, BlogPipeline) {
        provider.push_text(IDEAS);
        let session = session_with(provider);
        let mut pipeline = BlogPipeline::new();
        pipeline
            .generate_ideas(&session, BlogBrief::new("Coffee", "Students").with_tone("Casual"))
            .await
            .unwrap();
        pipeline.select_idea(0).unwrap();
        (session, pipeline)
    }

    const SECTIONS: &str = r#"[{"heading":"What is cold brew","keyPoints":["def"]}]"#;

    async fn at_complete(provider: Arc<ScriptedProvider>, article: &str) -> (SessionContext, BlogPipeline) {
        let (session, mut pipeline) = at_research(provider.clone()).await;
        pipeline.set_research(0, "competitor notes").unwrap();
        provider.push_text(SECTIONS);
        pipeline.generate_outline(&session).await.unwrap();
        provider.push_text(article);
        pipeline.write_article(&session).await.unwrap();
        (session, pipeline)
    }

    #[tokio::test]
    async fn test_select_moves_to_research() {
        let (_session, pipeline) = at_research(Arc::new(ScriptedProvider::new())).await;

        assert_eq!(pipeline.state(), WorkflowState::Research);
        assert_eq!(pipeline.document().selected_title, "Cold Brew 2025");
        assert_eq!(pipeline.document().seo_keywords.len(), 2);
        assert_eq!(pipeline.document().tone, "Casual");
    }

    #[tokio::test]
    async fn test_research_slots_bounded() {
        let (_session, mut pipeline) = at_research(Arc::new(ScriptedProvider::new())).await;

        pipeline.set_research(4, "competitor").unwrap();
        assert!(matches!(
            pipeline.set_research(RESEARCH_SLOTS, "x"),
            Err(DraftflowError::InvalidIndex { .. })
        ));
        assert_eq!(pipeline.document().competitor_content[4], "competitor");
    }

    #[tokio::test]
    async fn test_empty_outline_keeps_research_state() {
        let provider = Arc::new(ScriptedProvider::new());
        let (session, mut pipeline) = at_research(provider.clone()).await;
        provider.push_text("[]");

        let sections = pipeline.generate_outline(&session).await.unwrap();
        assert!(sections.is_empty());
        assert_eq!(pipeline.state(), WorkflowState::Research);
    }

    #[tokio::test]
    async fn test_audience_suggestions_are_soft() {
        let provider = Arc::new(ScriptedProvider::new().with_text(r#"["Students"]"#));
        let session = session_with(provider);
        let mut pipeline = BlogPipeline::new();

        assert_eq!(pipeline.suggest_audiences(&session, "Coffee", "English").await, vec!["Students".to_string()]);
        assert!(pipeline.suggest_audiences(&session, "Coffee", "English").await.is_empty());
        assert!(pipeline.audiences().is_empty());
        assert_eq!(pipeline.state(), WorkflowState::Strategy);
    }

    #[tokio::test]
    async fn test_regenerate_intro_requires_complete() {
        let (session, mut pipeline) = at_research(Arc::new(ScriptedProvider::new())).await;
        assert!(matches!(
            pipeline.regenerate_intro(&session).await,
            Err(DraftflowError::InvalidState { actual: WorkflowState::Research, .. })
        ));
    }

    #[tokio::test]
    async fn test_rerun_ideas_keeps_later_work() {
        let provider = Arc::new(ScriptedProvider::new());
        let (session, mut pipeline) = at_complete(provider.clone(), "# T\n\nintro\n\n## Part\nbody").await;
        let article = pipeline.document().full_content.clone();

        provider.push_text(r#"[{"title":"Iced Coffee","seoHook":"h","targetKeywords":["iced"]}]"#);
        pipeline
            .generate_ideas(&session, BlogBrief::new("Iced coffee", "Parents").with_tone("Formal"))
            .await
            .unwrap();

        assert_eq!(pipeline.state(), WorkflowState::Complete);
        assert_eq!(pipeline.document().full_content, article);
        assert_eq!(pipeline.document().outline.len(), 1);
        assert_eq!(pipeline.document().competitor_content[0], "competitor notes");
        assert_eq!(pipeline.candidates()[0].title, "Iced Coffee");
        assert!(pipeline.selected_idea().is_none());

        pipeline.select_idea(0).unwrap();
        assert_eq!(pipeline.state(), WorkflowState::Research);
        assert_eq!(pipeline.document().topic, "Iced coffee");
        assert_eq!(pipeline.document().tone, "Formal");
        assert_eq!(pipeline.document().competitor_content[0], "competitor notes");
        assert!(pipeline.document().outline.is_empty());
        assert!(pipeline.document().full_content.is_empty());
    }

    #[tokio::test]
    async fn test_intro_without_h2_leaves_article_untouched() {
        let provider = Arc::new(ScriptedProvider::new());
        let (session, mut pipeline) = at_complete(provider.clone(), "# T\n\nintro only").await;
        let before = pipeline.document().full_content.clone();
        let calls = provider.calls();

        let err = pipeline.regenerate_intro(&session).await.unwrap_err();

        assert!(matches!(err, DraftflowError::StructureNotFound));
        assert_eq!(pipeline.document().full_content.as_bytes(), before.as_bytes());
        assert_eq!(pipeline.state(), WorkflowState::Complete);
        assert_eq!(provider.calls(), calls);
    }

    #[tokio::test]
    async fn test_save_once_until_content_changes() {
        let provider = Arc::new(ScriptedProvider::new());
        let (session, mut pipeline) = at_complete(provider.clone(), "# T\n\nold\n\n## Part\nbody").await;
        let history = History::new(InMemoryStore::new());

        assert!(pipeline.save_to_history(&history).unwrap());
        assert!(pipeline.is_saved());
        assert!(!pipeline.save_to_history(&history).unwrap());
        assert_eq!(history.list(ArtifactKind::Blog).unwrap().len(), 1);

        provider.push_text("new intro");
        pipeline.regenerate_intro(&session).await.unwrap();
        assert!(!pipeline.is_saved());
        assert!(pipeline.save_to_history(&history).unwrap());
        assert_eq!(history.list(ArtifactKind::Blog).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_requires_complete() {
        let (_session, mut pipeline) = at_research(Arc::new(ScriptedProvider::new())).await;
        let history = History::new(InMemoryStore::new());
        assert!(pipeline.save_to_history(&history).is_err());
    }
}
