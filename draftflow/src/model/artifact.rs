//! Saved drafts.

use super::{BlogDocument, ScriptDocument};
use crate::export::script_text;
use crate::utils::{generate_id, now_utc, Timestamp};
use serde::{Deserialize, Serialize};

/// Which history a saved artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Video scripts.
    Script,
    /// Blog articles.
    Blog,
}

impl ArtifactKind {
    /// Storage key of this kind's history list.
    #[must_use]
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Script => "script_history",
            Self::Blog => "blog_history",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script => write!(f, "script"),
            Self::Blog => write!(f, "blog"),
        }
    }
}

/// A finished draft stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArtifact {
    /// Unique id.
    pub id: String,
    /// Title shown in history.
    pub title: String,
    /// Topic of the run.
    pub topic: String,
    /// Target audience of the run.
    pub audience: String,
    /// Full exported text.
    pub content: String,
    /// When it was saved.
    #[serde(rename = "date", alias = "createdAt")]
    pub created_at: Timestamp,
}

impl SavedArtifact {
    /// Creates an artifact with a fresh id, stamped now.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        audience: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            topic: topic.into(),
            audience: audience.into(),
            content: content.into(),
            created_at: now_utc(),
        }
    }

    /// Snapshot of a script, with its parts assembled into one text.
    #[must_use]
    pub fn from_script(doc: &ScriptDocument) -> Self {
        Self::new(
            doc.selected_title.clone(),
            doc.topic.clone(),
            doc.target_audience.clone(),
            script_text(doc),
        )
    }

    /// Snapshot of an article.
    #[must_use]
    pub fn from_blog(doc: &BlogDocument) -> Self {
        Self::new(
            doc.selected_title.clone(),
            doc.topic.clone(),
            doc.target_audience.clone(),
            doc.full_content.clone(),
        )
    }

    /// Case-insensitive match on title or topic.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.topic.to_lowercase().contains(&term)
    }
}
