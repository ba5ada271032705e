//! Configuration for provider access and prompt context.

use serde::{Deserialize, Serialize};

/// Environment variables checked, in order, for the default credential.
pub const DEFAULT_CREDENTIAL_ENV: [&str; 2] = ["DRAFTFLOW_API_KEY", "API_KEY"];

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "DRAFTFLOW_MODEL";

/// Environment variable overriding the provider base URL.
pub const API_BASE_ENV: &str = "DRAFTFLOW_API_BASE";

/// Configuration shared by every stage invocation in a session.
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Provider REST base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Process-wide fallback credential used when no credential is enabled.
    #[serde(default, skip_serializing)]
    pub default_credential: Option<String>,
    /// Optional per-request timeout. `None` leaves requests unbounded.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
    /// Year embedded in prompts as current context.
    #[serde(default = "default_year")]
    pub current_year: i32,
    /// Whether free-text stages request live web grounding.
    #[serde(default)]
    pub web_grounding: bool,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_year() -> i32 {
    crate::utils::current_year()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            default_credential: None,
            timeout_seconds: None,
            current_year: default_year(),
            web_grounding: false,
        }
    }
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field(
                "default_credential",
                &self.default_credential.as_ref().map(|_| "***"),
            )
            .field("timeout_seconds", &self.timeout_seconds)
            .field("current_year", &self.current_year)
            .field("web_grounding", &self.web_grounding)
            .finish()
    }
}

impl GenerationConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from defaults overridden by the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration using an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.default_credential = DEFAULT_CREDENTIAL_ENV
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(base) = lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }

        config
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the fallback credential.
    #[must_use]
    pub fn with_default_credential(mut self, secret: impl Into<String>) -> Self {
        self.default_credential = Some(secret.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the year embedded in prompts.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Enables or disables web grounding for free-text stages.
    #[must_use]
    pub fn with_web_grounding(mut self, enabled: bool) -> Self {
        self.web_grounding = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.default_credential.is_none());
        assert!(config.timeout_seconds.is_none());
        assert!(!config.web_grounding);
    }

    #[test]
    fn test_from_lookup_prefers_first_credential_var() {
        let config = GenerationConfig::from_lookup(lookup_from(&[
            ("DRAFTFLOW_API_KEY", "primary"),
            ("API_KEY", "secondary"),
        ]));
        assert_eq!(config.default_credential.as_deref(), Some("primary"));
    }

    #[test]
    fn test_from_lookup_skips_blank_values() {
        let config = GenerationConfig::from_lookup(lookup_from(&[
            ("DRAFTFLOW_API_KEY", "   "),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(config.default_credential.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GenerationConfig::from_lookup(lookup_from(&[
            ("DRAFTFLOW_MODEL", "gemini-2.5-pro"),
            ("DRAFTFLOW_API_BASE", "http://localhost:8080/"),
        ]));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_base, "http://localhost:8080");
        assert!(config.default_credential.is_none());
    }

    #[test]
    fn test_debug_hides_credential() {
        let config = GenerationConfig::new().with_default_credential("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"model": "m", "web_grounding": true}"#).unwrap();
        assert_eq!(config.model, "m");
        assert!(config.web_grounding);
        assert_eq!(config.api_base, default_api_base());
    }
}
