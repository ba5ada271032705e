//! The video script workflow.
//!
//! Strategy → Outline → Drafting → Complete. Drafting runs intro, body and
//! outro in order; body always sees the intro's final text.

use super::editing::{check_index, move_item, remove_item, replace_item, MoveDirection};
use super::failure::{DraftReport, FailureCollector, FailureRecord};
use super::runner::{log_transition, run_stage};
use super::state::{DraftProgress, SubStageStatus, WorkflowState};
use crate::errors::{DraftflowError, Result};
use crate::model::{ArtifactKind, OutlinePoint, PackagingIdea, SavedArtifact, ScriptBrief, ScriptDocument};
use crate::normalize::Normalized;
use crate::session::SessionContext;
use crate::stages::{BodyStage, IntroStage, OutroStage, PackagingStage, ScriptOutlineStage, Stage, StageName};
use crate::storage::{ArtifactStore, History};
use tracing::debug;

const WORKFLOW: &str = "script";

const DRAFT_STAGES: [StageName; 3] = [StageName::Intro, StageName::Body, StageName::Outro];

/// One end-to-end script run.
#[derive(Debug, Clone, Default)]
pub struct ScriptPipeline {
    state: WorkflowState,
    brief: Option<ScriptBrief>,
    document: ScriptDocument,
    candidates: Vec<PackagingIdea>,
    selected: Option<usize>,
    progress: DraftProgress,
    last_report: Option<DraftReport>,
    saved: bool,
}

impl ScriptPipeline {
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
    pub fn document(&self) -> &ScriptDocument {
        &self.document
    }

    /// Consumes the pipeline, returning its document.
    #[must_use]
    pub fn into_document(self) -> ScriptDocument {
        self.document
    }

    /// Packaging candidates from the last `generate_ideas`.
    #[must_use]
    pub fn candidates(&self) -> &[PackagingIdea] {
        &self.candidates
    }

    /// The chosen packaging, if any.
    #[must_use]
    pub fn selected_idea(&self) -> Option<&PackagingIdea> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    /// Sub-stage status of the current or last drafting burst.
    #[must_use]
    pub fn progress(&self) -> &DraftProgress {
        &self.progress
    }

    /// Report of the last drafting burst.
    #[must_use]
    pub fn last_report(&self) -> Option<&DraftReport> {
        self.last_report.as_ref()
    }

    /// Snapshot for history.
    #[must_use]
    pub fn to_artifact(&self) -> SavedArtifact {
        SavedArtifact::from_script(&self.document)
    }

    /// Whether the current drafts are already in history.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Saves the finished script to `history` once. Returns false without
    /// writing when it was already saved and has not changed since.
    pub fn save_to_history<S: ArtifactStore>(&mut self, history: &History<S>) -> Result<bool> {
        self.require(&[WorkflowState::Complete])?;
        if self.saved {
            debug!(workflow = WORKFLOW, "Script already saved");
            return Ok(false);
        }
        history.save(ArtifactKind::Script, self.to_artifact())?;
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

    /// Stage 1: generates packaging candidates. Allowed in any state except
    /// drafting.
    ///
    /// Previous candidates and the selection are discarded. The document and
    /// the state are left alone until a new candidate is selected; an empty
    /// result leaves nothing to select.
    pub async fn generate_ideas(
        &mut self,
        session: &SessionContext,
        brief: ScriptBrief,
    ) -> Result<Normalized<Vec<PackagingIdea>>> {
        self.require(&[WorkflowState::Strategy, WorkflowState::Outline, WorkflowState::Complete])?;
        let ideas = run_stage(session, WORKFLOW, &PackagingStage, &brief).await?;

        self.brief = Some(brief);
        self.candidates = ideas.clone().into_vec();
        self.selected = None;
        Ok(ideas)
    }

    /// Chooses a packaging candidate and opens the outline step.
    ///
    /// The document is rebuilt from the latest brief, so the outline and any
    /// drafts written for a different title are discarded.
    pub fn select_idea(&mut self, index: usize) -> Result<()> {
        self.require(&[WorkflowState::Strategy, WorkflowState::Outline, WorkflowState::Complete])?;
        check_index(index, self.candidates.len())?;

        if let Some(brief) = &self.brief {
            self.document = ScriptDocument::from_brief(brief);
        }
        let idea = self.candidates[index].clone();
        self.document.apply_idea(&idea);
        self.document.outline.clear();
        self.document.clear_drafts();
        self.progress = DraftProgress::default();
        self.last_report = None;
        self.saved = false;
        self.selected = Some(index);
        self.set_state(WorkflowState::Outline);
        Ok(())
    }

    /// Stage 2: generates the outline for the selected idea.
    ///
    /// A parsed outline replaces the current one; an empty result leaves it
    /// as it was.
    pub async fn generate_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<OutlinePoint>>> {
        self.require(&[WorkflowState::Outline])?;
        self.run_outline(session).await
    }

    /// Re-runs the outline stage, reopening the outline step.
    ///
    /// Drafts are kept: nothing downstream is re-run until the caller asks.
    pub async fn regenerate_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<OutlinePoint>>> {
        self.require(&[WorkflowState::Outline, WorkflowState::Complete])?;
        let result = self.run_outline(session).await?;
        self.set_state(WorkflowState::Outline);
        Ok(result)
    }

    async fn run_outline(&mut self, session: &SessionContext) -> Result<Normalized<Vec<OutlinePoint>>> {
        let points = run_stage(session, WORKFLOW, &ScriptOutlineStage, &self.document).await?;
        if let Normalized::Parsed(ref items) = points {
            self.document.outline = items.clone();
        }
        Ok(points)
    }

    /// Outline edits are allowed from the outline step and after drafting;
    /// any edit marks the run as unsaved.
    fn begin_edit(&mut self) -> Result<()> {
        self.require(&[WorkflowState::Outline, WorkflowState::Complete])?;
        self.saved = false;
        Ok(())
    }

    /// Replaces one outline point.
    pub fn edit_point(&mut self, index: usize, point: OutlinePoint) -> Result<()> {
        self.begin_edit()?;
        replace_item(&mut self.document.outline, index, point)
    }

    /// Moves a point one position up or down. Returns false at either end.
    pub fn move_point(&mut self, index: usize, direction: MoveDirection) -> Result<bool> {
        self.begin_edit()?;
        move_item(&mut self.document.outline, index, direction)
    }

    /// Removes one point.
    pub fn remove_point(&mut self, index: usize) -> Result<OutlinePoint> {
        self.begin_edit()?;
        remove_item(&mut self.document.outline, index)
    }

    /// Replaces the whole outline.
    pub fn set_outline(&mut self, points: Vec<OutlinePoint>) -> Result<()> {
        self.begin_edit()?;
        self.document.outline = points;
        Ok(())
    }

    /// Locks the outline and drafts intro, body and outro.
    pub async fn confirm_outline(&mut self, session: &SessionContext) -> Result<DraftReport> {
        self.require(&[WorkflowState::Outline])?;
        self.draft(session).await
    }

    /// Drafts every part again from the current outline.
    pub async fn redraft(&mut self, session: &SessionContext) -> Result<DraftReport> {
        self.require(&[WorkflowState::Complete])?;
        self.draft(session).await
    }

    async fn draft(&mut self, session: &SessionContext) -> Result<DraftReport> {
        session.stage_context().ensure_credential()?;

        self.set_state(WorkflowState::Drafting);
        self.document.clear_drafts();
        self.saved = false;
        self.progress = DraftProgress::new(&DRAFT_STAGES);
        let mut collector = FailureCollector::new();

        self.document.intro_script = self.draft_part(session, &IntroStage, &mut collector).await;
        self.document.body_script = self.draft_part(session, &BodyStage, &mut collector).await;
        self.document.outro_script = self.draft_part(session, &OutroStage, &mut collector).await;

        let report = collector.into_report();
        self.last_report = Some(report.clone());
        self.set_state(WorkflowState::Complete);
        Ok(report)
    }

    async fn draft_part<S>(&mut self, session: &SessionContext, stage: &S, collector: &mut FailureCollector) -> String
    where
        S: Stage<Input = ScriptDocument, Output = String>,
    {
        let name = stage.name();
        self.progress.set(name, SubStageStatus::Running);

        match run_stage(session, WORKFLOW, stage, &self.document).await {
            Ok(text) => {
                self.progress.set(name, SubStageStatus::Ok);
                collector.record_completion(name);
                text
            }
            Err(err) => {
                self.progress.set(name, SubStageStatus::Failed);
                collector.record_failure(FailureRecord::from_error(name, &err));
                String::new()
            }
        }
    }
}
