use super::ArtifactStore;
use crate::errors::Result;
use crate::model::SavedArtifact;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    lists: RwLock<HashMap<String, Vec<SavedArtifact>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.lists.read().len()
    }
}

impl ArtifactStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Vec<SavedArtifact>> {
        Ok(self.lists.read().get(key).cloned().unwrap_or_default())
    }

    fn save(&self, key: &str, items: &[SavedArtifact]) -> Result<()> {
        self.lists.write().insert(key.to_string(), items.to_vec());
        Ok(())
    }
}
