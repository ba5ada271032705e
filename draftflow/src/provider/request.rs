//! Provider request and response types.

use serde::{Deserialize, Serialize};

/// How the provider should shape its output.
///
/// A response schema and live web grounding cannot be combined, so they are
/// separate variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "schema", rename_all = "snake_case")]
pub enum OutputMode {
    /// Free text.
    #[default]
    Text,
    /// JSON constrained by the given schema.
    Structured(serde_json::Value),
    /// Free text with web search grounding.
    Grounded,
}

/// A single "generate content" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier.
    pub model: String,
    /// The instruction text.
    pub prompt: String,
    /// Optional behavioral preamble.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// Output shaping.
    #[serde(default)]
    pub output: OutputMode,
}

impl GenerateRequest {
    /// Creates a free-text request.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            output: OutputMode::Text,
        }
    }

    /// Sets the system instruction.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Requests JSON output matching `schema`. Replaces web grounding.
    #[must_use]
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.output = OutputMode::Structured(schema);
        self
    }

    /// Requests web grounding. Replaces any response schema.
    #[must_use]
    pub fn with_web_grounding(mut self) -> Self {
        self.output = OutputMode::Grounded;
        self
    }

    /// Returns true if a response schema is attached.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self.output, OutputMode::Structured(_))
    }
}

/// A web source the provider consulted while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Source URL.
    pub url: String,
    /// Display title, possibly empty.
    #[serde(default)]
    pub title: String,
}

impl Citation {
    /// Creates a citation.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Raw provider output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text, possibly empty.
    pub text: String,
    /// Grounding citations, in the order the provider reported them.
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl GenerateResponse {
    /// Creates a response without citations.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    /// Attaches citations.
    #[must_use]
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_and_grounding_are_exclusive() {
        let req = GenerateRequest::new("m", "p")
            .with_schema(serde_json::json!({"type": "ARRAY"}))
            .with_web_grounding();
        assert_eq!(req.output, OutputMode::Grounded);

        let req = GenerateRequest::new("m", "p")
            .with_web_grounding()
            .with_schema(serde_json::json!({"type": "ARRAY"}));
        assert!(req.is_structured());
    }

    #[test]
    fn test_default_output_is_text() {
        let req = GenerateRequest::new("m", "p");
        assert_eq!(req.output, OutputMode::Text);
        assert!(req.system_instruction.is_none());
    }

    #[test]
    fn test_response_builders() {
        let resp = GenerateResponse::text("hello")
            .with_citations(vec![Citation::new("https://a.example", "A")]);
        assert_eq!(resp.text, "hello");
        assert_eq!(resp.citations.len(), 1);
    }
}
