//! Gemini REST transport.

use super::{Citation, GenerateRequest, GenerateResponse, OutputMode, ProviderBackend};
use crate::config::GenerationConfig;
use crate::errors::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Gemini `generateContent` transport.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: Client,
    api_base: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireResponseContent>,
    #[serde(default)]
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct WireResponseContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WireGroundingChunk {
    #[serde(default)]
    web: Option<WireWebSource>,
}

#[derive(Debug, Default, Deserialize)]
struct WireWebSource {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl GeminiBackend {
    /// Creates a transport from the session configuration.
    pub fn new(config: &GenerationConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout(config) {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

/// The configured timeout, or `None` when unset or not a representable
/// positive duration.
fn request_timeout(config: &GenerationConfig) -> Option<Duration> {
    let seconds = config.timeout_seconds?;
    match Duration::try_from_secs_f64(seconds) {
        Ok(timeout) if !timeout.is_zero() => Some(timeout),
        _ => {
            warn!(timeout_seconds = seconds, "Ignoring invalid request timeout");
            None
        }
    }
}

fn build_body(request: &GenerateRequest) -> WireRequest<'_> {
    let (generation_config, tools) = match &request.output {
        OutputMode::Text => (None, None),
        OutputMode::Structured(schema) => (
            Some(WireGenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
            None,
        ),
        OutputMode::Grounded => (None, Some(vec![serde_json::json!({"googleSearch": {}})])),
    };

    WireRequest {
        contents: vec![WireContent {
            role: Some("user"),
            parts: vec![WirePart {
                text: &request.prompt,
            }],
        }],
        system_instruction: request.system_instruction.as_deref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart { text }],
        }),
        generation_config,
        tools,
    }
}

fn into_response(wire: WireResponse) -> Result<GenerateResponse, ProviderError> {
    let candidate = wire
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let citations = candidate
        .grounding_metadata
        .map(|meta| {
            meta.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let url = web.uri.filter(|u| !u.is_empty())?;
                    Some(Citation::new(url, web.title.unwrap_or_default()))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerateResponse { text, citations })
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    async fn generate_content(
        &self,
        secret: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        let start = Instant::now();
        let body = build_body(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", secret)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), model = %request.model, "Provider returned error status");
            return Err(ProviderError::status(status.as_u16(), body));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let result = into_response(wire)?;
        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            text_len = result.text.len(),
            citations = result.citations.len(),
            "Provider call completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_request_body() {
        let request = GenerateRequest::new("m", "write").with_system_instruction("be brief");
        let body = serde_json::to_value(build_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "write");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_structured_request_body() {
        let schema = serde_json::json!({"type": "ARRAY"});
        let request = GenerateRequest::new("m", "p").with_schema(schema.clone());
        let body = serde_json::to_value(build_body(&request)).unwrap();

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_grounded_request_body() {
        let request = GenerateRequest::new("m", "p").with_web_grounding();
        let body = serde_json::to_value(build_body(&request)).unwrap();

        assert_eq!(body["tools"][0], serde_json::json!({"googleSearch": {}}));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_and_citations() {
        let wire: WireResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"web": {"uri": ""}},
                    {"retrievedContext": {}}
                ]}
            }]
        }))
        .unwrap();

        let response = into_response(wire).unwrap();
        assert_eq!(response.text, "Hello world");
        assert_eq!(response.citations, vec![Citation::new("https://a.example", "A")]);
    }

    #[test]
    fn test_response_without_candidates() {
        let wire: WireResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(into_response(wire), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_candidate_without_content_is_empty_text() {
        let wire: WireResponse =
            serde_json::from_value(serde_json::json!({"candidates": [{}]})).unwrap();
        assert_eq!(into_response(wire).unwrap().text, "");
    }

    #[test]
    fn test_request_timeout_ignores_invalid_values() {
        assert_eq!(request_timeout(&GenerationConfig::new()), None);
        assert_eq!(
            request_timeout(&GenerationConfig::new().with_timeout(2.5)),
            Some(Duration::from_millis(2500))
        );
        for seconds in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300] {
            assert_eq!(request_timeout(&GenerationConfig::new().with_timeout(seconds)), None);
        }
        assert!(GeminiBackend::new(&GenerationConfig::new().with_timeout(1e300)).is_ok());
    }

    #[test]
    fn test_endpoint() {
        let config = GenerationConfig::new().with_api_base("http://localhost:9000/v1beta/");
        let backend = GeminiBackend::new(&config).unwrap();
        assert_eq!(
            backend.endpoint("gemini-2.5-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
