//! # Draftflow
//!
//! Multi-stage LLM content generation for video scripts and blog posts.
//!
//! Draftflow drives two guided workflows over a generative provider:
//!
//! - **Script**: packaging ideas, an editable outline, then intro, body and
//!   outro drafted in sequence
//! - **Blog**: headline strategies, competitor research, an editable outline,
//!   the full article and intro regeneration
//!
//! Every call draws a random key from the session's enabled credentials.
//! Structured responses are salvaged from fenced or chatty model output, and
//! a drafting burst always finishes with a per-stage failure report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use draftflow::prelude::*;
//!
//! let session = SessionContext::gemini(GenerationConfig::from_env())?;
//! session.add_credential("primary", "AIza...");
//!
//! let mut script = ScriptPipeline::new();
//! script.generate_ideas(&session, ScriptBrief::new("Rust async", "Developers")).await?;
//! script.select_idea(0)?;
//! script.generate_outline(&session).await?;
//! let report = script.confirm_outline(&session).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod credentials;
pub mod errors;
pub mod events;
pub mod export;
pub mod model;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod session;
pub mod stages;
pub mod storage;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::GenerationConfig;
    pub use crate::credentials::{Credential, CredentialPool};
    pub use crate::errors::{DraftflowError, ProviderError};
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::export::{export_filename, markdown_to_html, ExportFormat, MarkdownFlavor};
    pub use crate::model::{
        ArtifactKind, BlogBrief, BlogDocument, BlogIdea, BlogOutlineSection, OutlinePoint, PackagingIdea,
        SavedArtifact, ScriptBrief, ScriptDocument,
    };
    pub use crate::normalize::{EmptyReason, Normalized};
    pub use crate::pipeline::{BlogPipeline, DraftReport, MoveDirection, ScriptPipeline, WorkflowState};
    pub use crate::provider::{ClientFactory, GenerateRequest, GenerateResponse, OutputMode, ProviderBackend};
    pub use crate::session::SessionContext;
    pub use crate::stages::{Stage, StageContext, StageName};
    pub use crate::storage::{ArtifactStore, History, InMemoryStore, JsonFileStore};
    pub use crate::utils::{generate_id, Timestamp};
}
