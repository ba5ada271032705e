//! Blog article types.

use super::{lenient, DEFAULT_LANGUAGE, DEFAULT_TONE};
use serde::{Deserialize, Serialize};

/// Number of competitor research slots.
pub const RESEARCH_SLOTS: usize = 5;

/// User-supplied inputs for a new article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogBrief {
    /// Subject of the article.
    pub topic: String,
    /// Who the article is for.
    pub target_audience: String,
    /// Voice requested for every stage.
    #[serde(default = "default_tone")]
    pub tone: String,
    /// Output language for every stage.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl BlogBrief {
    /// Creates a brief in English with a neutral tone.
    #[must_use]
    pub fn new(topic: impl Into<String>, target_audience: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            target_audience: target_audience.into(),
            tone: default_tone(),
            language: default_language(),
        }
    }

    /// Sets the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Sets the output language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// A headline candidate with its SEO angle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogIdea {
    /// Proposed headline.
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Why the headline should rank.
    #[serde(default, deserialize_with = "lenient::string")]
    pub seo_hook: String,
    /// Primary and related keywords.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub target_keywords: Vec<String>,
}

/// One section of an article outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogOutlineSection {
    /// Stable identifier, assigned when the model omits one.
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Second-level heading text.
    #[serde(default, deserialize_with = "lenient::string")]
    pub heading: String,
    /// Bullet points under the heading.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_points: Vec<String>,
}

impl BlogOutlineSection {
    /// Creates a section without key points.
    #[must_use]
    pub fn new(id: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            key_points: Vec::new(),
        }
    }

    /// Sets the key points.
    #[must_use]
    pub fn with_key_points(mut self, points: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.key_points = points.into_iter().map(Into::into).collect();
        self
    }
}

/// The working document of the blog workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDocument {
    /// Subject of the article.
    pub topic: String,
    /// Who the article is for.
    pub target_audience: String,
    /// Voice requested for every stage.
    pub tone: String,
    /// Output language for every stage.
    pub language: String,
    /// Headline of the chosen strategy.
    pub selected_title: String,
    /// Keywords of the chosen strategy.
    pub seo_keywords: Vec<String>,
    /// Pasted competitor articles, one per research slot.
    pub competitor_content: Vec<String>,
    /// Editable article outline.
    pub outline: Vec<BlogOutlineSection>,
    /// Finished article in Markdown.
    pub full_content: String,
}

impl Default for BlogDocument {
    fn default() -> Self {
        Self {
            topic: String::new(),
            target_audience: String::new(),
            tone: default_tone(),
            language: default_language(),
            selected_title: String::new(),
            seo_keywords: Vec::new(),
            competitor_content: vec![String::new(); RESEARCH_SLOTS],
            outline: Vec::new(),
            full_content: String::new(),
        }
    }
}

impl BlogDocument {
    /// Starts a document from a brief.
    #[must_use]
    pub fn from_brief(brief: &BlogBrief) -> Self {
        Self {
            topic: brief.topic.clone(),
            target_audience: brief.target_audience.clone(),
            tone: brief.tone.clone(),
            language: brief.language.clone(),
            ..Self::default()
        }
    }

    /// Copies the headline and keywords of the chosen idea.
    pub fn apply_idea(&mut self, idea: &BlogIdea) {
        self.selected_title = idea.title.clone();
        self.seo_keywords = idea.target_keywords.clone();
    }

    /// Non-blank research entries, in slot order.
    pub fn research(&self) -> impl Iterator<Item = &str> {
        self.competitor_content
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// True when at least one research slot has content.
    #[must_use]
    pub fn has_research(&self) -> bool {
        self.research().next().is_some()
    }

    /// True once the article has been written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.full_content.trim().is_empty()
    }
}
