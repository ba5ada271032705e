//! Credential pool.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// A named provider secret that can be switched on and off.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Unique identifier.
    pub id: String,
    /// Label shown to the user.
    pub display_name: String,
    /// The secret sent to the provider.
    pub secret_value: String,
    /// Disabled credentials are never selected.
    pub enabled: bool,
}

impl Credential {
    /// Creates an enabled credential with a fresh id.
    #[must_use]
    pub fn new(display_name: impl Into<String>, secret_value: impl Into<String>) -> Self {
        Self {
            id: crate::utils::generate_id(),
            display_name: display_name.into(),
            secret_value: secret_value.into(),
            enabled: true,
        }
    }

    /// Short digest of the secret, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.secret_value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("secret_value", &fingerprint(&self.secret_value))
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Returns the first 8 hex characters of the secret's SHA-256 digest.
#[must_use]
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(digest)[..8].to_string()
}

/// Ordered collection of credentials owned by a session.
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new enabled credential. Identical secrets are allowed.
    pub fn add(
        &mut self,
        display_name: impl Into<String>,
        secret_value: impl Into<String>,
    ) -> Credential {
        let credential = Credential::new(display_name, secret_value);
        debug!(
            credential_id = %credential.id,
            fingerprint = %credential.fingerprint(),
            "Credential added"
        );
        self.credentials.push(credential.clone());
        credential
    }

    /// Enables or disables a credential. Returns false for unknown ids.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.credentials.iter_mut().find(|c| c.id == id) {
            Some(credential) => {
                credential.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Flips a credential's enabled flag, returning the new value.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let credential = self.credentials.iter_mut().find(|c| c.id == id)?;
        credential.enabled = !credential.enabled;
        Some(credential.enabled)
    }

    /// Removes a credential.
    pub fn remove(&mut self, id: &str) -> Option<Credential> {
        let idx = self.credentials.iter().position(|c| c.id == id)?;
        Some(self.credentials.remove(idx))
    }

    /// Looks up a credential by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Iterates credentials in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    /// Secrets of every enabled credential, in insertion order.
    #[must_use]
    pub fn active_secrets(&self) -> Vec<String> {
        self.credentials
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.secret_value.clone())
            .collect()
    }

    /// Number of enabled credentials.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.credentials.iter().filter(|c| c.enabled).count()
    }

    /// Total number of credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Returns true if the pool holds no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_creates_enabled_credential() {
        let mut pool = CredentialPool::new();
        let cred = pool.add("Main", "key-1");

        assert!(cred.enabled);
        assert!(!cred.id.is_empty());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_duplicate_secrets_allowed() {
        let mut pool = CredentialPool::new();
        let a = pool.add("A", "same");
        let b = pool.add("B", "same");

        assert_ne!(a.id, b.id);
        assert_eq!(pool.active_secrets(), vec!["same".to_string(), "same".to_string()]);
    }

    #[test]
    fn test_active_secrets_insertion_order() {
        let mut pool = CredentialPool::new();
        pool.add("one", "k1");
        let two = pool.add("two", "k2");
        pool.add("three", "k3");

        pool.set_enabled(&two.id, false);
        assert_eq!(pool.active_secrets(), vec!["k1".to_string(), "k3".to_string()]);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_set_enabled_leaves_others_untouched() {
        let mut pool = CredentialPool::new();
        let a = pool.add("a", "ka");
        let b = pool.add("b", "kb");

        assert!(pool.set_enabled(&a.id, false));
        assert!(!pool.get(&a.id).unwrap().enabled);
        assert!(pool.get(&b.id).unwrap().enabled);
        assert!(!pool.set_enabled("missing", true));
    }

    #[test]
    fn test_toggle() {
        let mut pool = CredentialPool::new();
        let a = pool.add("a", "ka");

        assert_eq!(pool.toggle(&a.id), Some(false));
        assert_eq!(pool.toggle(&a.id), Some(true));
        assert_eq!(pool.toggle("missing"), None);
    }

    #[test]
    fn test_remove() {
        let mut pool = CredentialPool::new();
        let a = pool.add("a", "ka");
        pool.add("b", "kb");

        let removed = pool.remove(&a.id).unwrap();
        assert_eq!(removed.display_name, "a");
        assert_eq!(pool.active_secrets(), vec!["kb".to_string()]);
        assert!(pool.remove(&a.id).is_none());
    }

    #[test]
    fn test_empty_pool_has_no_secrets() {
        let pool = CredentialPool::new();
        assert!(pool.is_empty());
        assert!(pool.active_secrets().is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let cred = Credential::new("a", "very-secret-value");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("very-secret-value"));
        assert!(debug.contains(&cred.fingerprint()));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
        assert_eq!(fingerprint("abc").len(), 8);
    }
}
