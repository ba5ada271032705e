//! Client factory with random key rotation.

use super::{GenerateRequest, GenerateResponse, ProviderBackend};
use crate::credentials::fingerprint;
use crate::errors::{DraftflowError, ProviderError};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::debug;

/// Builds provider clients bound to a single credential.
///
/// Every call draws a secret uniformly at random from the snapshot it is
/// given. Nothing is remembered between draws: a failing key stays in the
/// rotation and may be drawn again.
#[derive(Clone)]
pub struct ClientFactory {
    backend: Arc<dyn ProviderBackend>,
    default_credential: Option<String>,
}

impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("has_default_credential", &self.default_credential.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientFactory {
    /// Creates a factory over a transport, without a fallback credential.
    #[must_use]
    pub fn new(backend: Arc<dyn ProviderBackend>) -> Self {
        Self {
            backend,
            default_credential: None,
        }
    }

    /// Sets the process-wide fallback credential.
    #[must_use]
    pub fn with_default_credential(mut self, secret: Option<String>) -> Self {
        self.default_credential = secret.filter(|s| !s.is_empty());
        self
    }

    /// Returns true if `build_client` would succeed for this snapshot.
    #[must_use]
    pub fn has_credential(&self, secrets: &[String]) -> bool {
        !secrets.is_empty() || self.default_credential.is_some()
    }

    /// Picks the secret for one remote call.
    pub fn select_secret(&self, secrets: &[String]) -> Result<String, DraftflowError> {
        if let Some(secret) = secrets.choose(&mut rand::thread_rng()) {
            return Ok(secret.clone());
        }
        self.default_credential
            .clone()
            .ok_or(DraftflowError::MissingCredential)
    }

    /// Builds a client bound to one randomly selected secret.
    pub fn build_client(&self, secrets: &[String]) -> Result<ProviderClient, DraftflowError> {
        let secret = self.select_secret(secrets)?;
        debug!(
            pool_size = secrets.len(),
            fingerprint = %fingerprint(&secret),
            "Built provider client"
        );
        Ok(ProviderClient {
            backend: Arc::clone(&self.backend),
            secret,
        })
    }
}

/// A provider client bound to exactly one credential.
#[derive(Clone)]
pub struct ProviderClient {
    backend: Arc<dyn ProviderBackend>,
    secret: String,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

impl ProviderClient {
    /// The secret this client authenticates with.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Loggable digest of the bound secret.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.secret)
    }

    /// Performs the remote call.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        self.backend.generate_content(&self.secret, request).await
    }
}
