//! Domain types shared by the stages and pipelines.
//!
//! Types produced by the provider deserialize leniently: missing or null
//! fields become empty values instead of errors, since field-by-field
//! validation of provider output is not part of the contract.

mod artifact;
mod blog;
pub(crate) mod lenient;
mod script;

pub use artifact::{ArtifactKind, SavedArtifact};
pub use blog::{BlogBrief, BlogDocument, BlogIdea, BlogOutlineSection, RESEARCH_SLOTS};
pub use script::{OutlinePoint, PackagingIdea, ScriptBrief, ScriptDocument};

/// Default output language.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Default blog tone.
pub const DEFAULT_TONE: &str = "Professional";
