//! Error types for the draftflow pipelines.
//!
//! Provider transport failures are kept separate from pipeline errors so
//! that stage executors can wrap them with the name of the failing stage.

use crate::pipeline::WorkflowState;
use crate::stages::StageName;
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for draftflow operations.
#[derive(Debug, Error)]
pub enum DraftflowError {
    /// No enabled credential and no default credential configured.
    #[error("No credential available: add a credential to continue")]
    MissingCredential,

    /// A remote call at the given stage failed.
    #[error("Generation failed at stage '{stage}': {message}")]
    GenerationFailed {
        /// The stage that failed.
        stage: StageName,
        /// The underlying failure.
        message: String,
    },

    /// The document has no second-level heading to split the intro at.
    #[error("Could not identify document structure (missing '## ' headings)")]
    StructureNotFound,

    /// A workflow operation was called in the wrong state.
    #[error("Invalid {workflow} workflow state: expected {expected}, found {actual}")]
    InvalidState {
        /// Workflow kind ("script" or "blog").
        workflow: &'static str,
        /// Human readable list of accepted states.
        expected: String,
        /// The state the workflow was in.
        actual: WorkflowState,
    },

    /// An index into a candidate or outline list was out of range.
    #[error("Index {index} out of range (len {len})")]
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// The collection length.
        len: usize,
    },

    /// The artifact store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DraftflowError {
    /// Creates a generation failure for a stage.
    #[must_use]
    pub fn generation_failed(stage: StageName, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            stage,
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(
        workflow: &'static str,
        expected: impl Into<String>,
        actual: WorkflowState,
    ) -> Self {
        Self::InvalidState {
            workflow,
            expected: expected.into(),
            actual,
        }
    }

    /// Returns the stage this error is scoped to, if any.
    #[must_use]
    pub fn stage(&self) -> Option<StageName> {
        match self {
            Self::GenerationFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns true if the error belongs to a single stage and leaves
    /// completed stages intact.
    #[must_use]
    pub fn is_stage_scoped(&self) -> bool {
        matches!(self, Self::GenerationFailed { .. } | Self::StructureNotFound)
    }

    /// Short machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MissingCredential",
            Self::GenerationFailed { .. } => "GenerationFailed",
            Self::StructureNotFound => "StructureNotFound",
            Self::InvalidState { .. } => "InvalidState",
            Self::InvalidIndex { .. } => "InvalidIndex",
            Self::Storage(_) => "Storage",
            Self::Serialization(_) => "Serialization",
            Self::Io(_) => "Io",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Some(stage) = self.stage() {
            map.insert("stage".to_string(), serde_json::json!(stage.as_str()));
        }
        map
    }
}

impl From<serde_json::Error> for DraftflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised by a provider transport.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The provider answered but returned no candidates.
    #[error("Provider returned no content")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Creates a status error.
    #[must_use]
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            code,
            body: body.into(),
        }
    }
}

/// Result alias for draftflow operations.
pub type Result<T, E = DraftflowError> = std::result::Result<T, E>;
