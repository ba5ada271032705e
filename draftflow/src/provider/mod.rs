//! Generative provider boundary.
//!
//! This module provides:
//! - The request/response types for the single "generate content" call
//! - The [`ProviderBackend`] transport trait
//! - The client factory implementing random key rotation
//! - A Gemini REST transport (feature `gemini`)

mod factory;
#[cfg(feature = "gemini")]
mod gemini;
mod request;

pub use factory::{ClientFactory, ProviderClient};
#[cfg(feature = "gemini")]
pub use gemini::GeminiBackend;
pub use request::{Citation, GenerateRequest, GenerateResponse, OutputMode};

use crate::errors::ProviderError;
use async_trait::async_trait;

/// Transport for the provider's "generate content" call.
///
/// Implementations perform exactly one request per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    /// Sends one request authenticated with `secret`.
    async fn generate_content(
        &self,
        secret: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError>;
}
