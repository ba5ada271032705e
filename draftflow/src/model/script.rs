//! Video script types.

use super::{lenient, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

/// User-supplied inputs for a new script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptBrief {
    /// Subject of the video.
    pub topic: String,
    /// Who the video is for.
    pub target_audience: String,
    /// Output language for every stage.
    #[serde(default = "default_language")]
    pub language: String,
    /// Optional call to action woven into the body.
    #[serde(default)]
    pub cta: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl ScriptBrief {
    /// Creates a brief in the default language without a call to action.
    #[must_use]
    pub fn new(topic: impl Into<String>, target_audience: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            target_audience: target_audience.into(),
            language: default_language(),
            cta: None,
        }
    }

    /// Sets the output language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the call to action.
    #[must_use]
    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = Some(cta.into());
        self
    }
}

/// A title/thumbnail/angle candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingIdea {
    /// Video title.
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Thumbnail concept.
    #[serde(default, alias = "thumbnailConcept", deserialize_with = "lenient::string")]
    pub thumbnail: String,
    /// Core premise of the video.
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_idea: String,
    /// What the viewer expects to get.
    #[serde(default, deserialize_with = "lenient::string")]
    pub expectations: String,
    /// Why the packaging earns the click.
    #[serde(default, deserialize_with = "lenient::string")]
    pub psychology: String,
}

/// One point of a script outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePoint {
    /// Stable identifier, assigned when the model omits one.
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Short label for the point.
    #[serde(default, deserialize_with = "lenient::string")]
    pub headline: String,
    /// What is covered.
    #[serde(default, deserialize_with = "lenient::string")]
    pub what: String,
    /// Why it matters to the viewer.
    #[serde(default, deserialize_with = "lenient::string")]
    pub why: String,
    /// How it is shown or explained.
    #[serde(default, deserialize_with = "lenient::string")]
    pub how: String,
}

impl OutlinePoint {
    /// Creates a point with empty details.
    #[must_use]
    pub fn new(id: impl Into<String>, headline: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headline: headline.into(),
            ..Self::default()
        }
    }
}

/// The working document of the script workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDocument {
    /// Subject of the video.
    pub topic: String,
    /// Who the video is for.
    pub target_audience: String,
    /// Output language for every stage.
    pub language: String,
    /// Call to action; empty when none.
    pub cta: String,
    /// Title of the chosen packaging.
    pub selected_title: String,
    /// Thumbnail of the chosen packaging.
    pub selected_thumbnail: String,
    /// Premise of the chosen packaging.
    pub selected_video_idea: String,
    /// Expectations set by the chosen packaging.
    pub selected_expectations: String,
    /// Editable outline.
    pub outline: Vec<OutlinePoint>,
    /// Drafted hook.
    pub intro_script: String,
    /// Drafted body.
    pub body_script: String,
    /// Drafted outro.
    pub outro_script: String,
}

impl ScriptDocument {
    /// Starts a document from a brief.
    #[must_use]
    pub fn from_brief(brief: &ScriptBrief) -> Self {
        Self {
            topic: brief.topic.clone(),
            target_audience: brief.target_audience.clone(),
            language: brief.language.clone(),
            cta: brief.cta.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Copies the packaging fields of the chosen idea.
    pub fn apply_idea(&mut self, idea: &PackagingIdea) {
        self.selected_title = idea.title.clone();
        self.selected_thumbnail = idea.thumbnail.clone();
        self.selected_video_idea = idea.video_idea.clone();
        self.selected_expectations = idea.expectations.clone();
    }

    /// The call to action, when one was given.
    #[must_use]
    pub fn cta(&self) -> Option<&str> {
        let cta = self.cta.trim();
        (!cta.is_empty()).then_some(cta)
    }

    /// True once every part has been drafted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.intro_script.is_empty() && !self.body_script.is_empty() && !self.outro_script.is_empty()
    }

    /// Clears all drafted parts.
    pub fn clear_drafts(&mut self) {
        self.intro_script.clear();
        self.body_script.clear();
        self.outro_script.clear();
    }
}
