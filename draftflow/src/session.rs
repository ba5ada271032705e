//! Session context shared by pipelines.
//!
//! A session owns the credential pool, the client factory, the generation
//! config and the event sink. It is passed explicitly to every pipeline
//! operation that makes a remote call; nothing is held in globals.

use crate::config::GenerationConfig;
use crate::credentials::{Credential, CredentialPool};
use crate::events::{EventSink, NoOpEventSink};
use crate::provider::{ClientFactory, ProviderBackend};
use crate::stages::StageContext;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Everything pipelines read from outside their own document.
pub struct SessionContext {
    credentials: RwLock<CredentialPool>,
    factory: ClientFactory,
    config: GenerationConfig,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("credentials", &self.credentials.read().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates a session over a transport.
    ///
    /// The config's default credential becomes the factory fallback.
    #[must_use]
    pub fn new(config: GenerationConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        let factory = ClientFactory::new(backend).with_default_credential(config.default_credential.clone());
        Self {
            credentials: RwLock::new(CredentialPool::new()),
            factory,
            config,
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Creates a session talking to the Gemini REST API.
    #[cfg(feature = "gemini")]
    pub fn gemini(config: GenerationConfig) -> Result<Self, crate::errors::ProviderError> {
        let backend = crate::provider::GeminiBackend::new(&config)?;
        info!(model = %config.model, "Gemini session created");
        Ok(Self::new(config, Arc::new(backend)))
    }

    /// Routes stage events to `events`.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Replaces the credential pool.
    #[must_use]
    pub fn with_credentials(self, pool: CredentialPool) -> Self {
        *self.credentials.write() = pool;
        self
    }

    /// Adds an enabled credential.
    pub fn add_credential(&self, display_name: impl Into<String>, secret_value: impl Into<String>) -> Credential {
        let credential = self.credentials.write().add(display_name, secret_value);
        info!(credential_id = %credential.id, "Credential registered");
        credential
    }

    /// Enables or disables one credential. Returns false for an unknown id.
    pub fn set_credential_enabled(&self, id: &str, enabled: bool) -> bool {
        self.credentials.write().set_enabled(id, enabled)
    }

    /// Flips one credential, returning its new enabled flag.
    pub fn toggle_credential(&self, id: &str) -> Option<bool> {
        self.credentials.write().toggle(id)
    }

    /// Deletes one credential.
    pub fn remove_credential(&self, id: &str) -> Option<Credential> {
        self.credentials.write().remove(id)
    }

    /// Snapshot of all credentials, in insertion order.
    #[must_use]
    pub fn credentials(&self) -> Vec<Credential> {
        self.credentials.read().iter().cloned().collect()
    }

    /// Enabled secrets right now.
    #[must_use]
    pub fn active_secrets(&self) -> Vec<String> {
        self.credentials.read().active_secrets()
    }

    /// Generation settings.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Client factory shared by every stage.
    #[must_use]
    pub fn factory(&self) -> &ClientFactory {
        &self.factory
    }

    /// Sink receiving stage events.
    #[must_use]
    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    /// Builds the context for one stage invocation, capturing the active
    /// credential set at this moment.
    #[must_use]
    pub fn stage_context(&self) -> StageContext<'_> {
        StageContext::new(&self.factory, self.active_secrets(), &self.config, self.events.as_ref())
    }
}
