use super::{Stage, StageContext, StageName};
use crate::errors::Result;
use crate::normalize::Normalized;
use crate::prompts::{blog, blog_system_instruction, schema};
use async_trait::async_trait;

/// Input for [`AudienceSuggestionStage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceRequest {
    /// Subject to suggest audiences for.
    pub topic: String,
    /// Output language.
    pub language: String,
}

impl AudienceRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(topic: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
        }
    }
}

/// Suggests target audiences for a topic. Advisory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudienceSuggestionStage;

#[async_trait]
impl Stage for AudienceSuggestionStage {
    type Input = AudienceRequest;
    type Output = Normalized<Vec<String>>;

    fn name(&self) -> StageName {
        StageName::AudienceSuggestion
    }

    async fn execute(&self, ctx: &StageContext<'_>, input: &AudienceRequest) -> Result<Self::Output> {
        ctx.generate_list(
            self.name(),
            blog::audiences(&input.topic, &input.language),
            blog_system_instruction(&input.language),
            schema::string_list(),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::events::NoOpEventSink;
    use crate::provider::ClientFactory;
    use crate::testing::ScriptedProvider;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_suggestions_parsed_from_string_list() {
        let provider = Arc::new(ScriptedProvider::new().with_text(r#"["Students", "Baristas"]"#));
        let factory = ClientFactory::new(provider);
        let config = GenerationConfig::new();
        let ctx = StageContext::new(&factory, vec!["k".into()], &config, &NoOpEventSink);

        let audiences = AudienceSuggestionStage
            .execute(&ctx, &AudienceRequest::new("Coffee", "English"))
            .await
            .unwrap()
            .into_vec();

        assert_eq!(audiences, vec!["Students".to_string(), "Baristas".to_string()]);
    }
}
