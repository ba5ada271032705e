//! A scripted provider transport.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::errors::ProviderError;
use crate::provider::{GenerateRequest, GenerateResponse, ProviderBackend};

/// One queued reply.
pub type Reply = Result<GenerateResponse, ProviderError>;

/// Replays queued replies in order and records each request.
///
/// When the queue runs dry every further call fails with an HTTP error, so a
/// test that triggers an unexpected request sees a stage failure instead of
/// a hang.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<(String, GenerateRequest)>>,
}

impl ScriptedProvider {
    /// Creates a provider with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plain text reply.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Ok(GenerateResponse::text(text)));
        self
    }

    /// Queues a full response.
    #[must_use]
    pub fn with_response(self, response: GenerateResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queues a reply on a shared provider.
    pub fn push(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }

    /// Queues a text reply on a shared provider.
    pub fn push_text(&self, text: impl Into<String>) {
        self.push(Ok(GenerateResponse::text(text)));
    }

    /// Number of requests received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Requests in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().last().map(|(_, r)| r.clone())
    }

    /// Secrets used, in arrival order.
    #[must_use]
    pub fn secrets(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(s, _)| s.clone()).collect()
    }

    /// Replies not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl ProviderBackend for ScriptedProvider {
    async fn generate_content(&self, secret: &str, request: &GenerateRequest) -> Reply {
        self.requests.lock().push((secret.to_string(), request.clone()));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Http("no scripted reply left".to_string())))
    }
}
