//! Saved-draft history.
//!
//! An [`ArtifactStore`] holds one list of [`SavedArtifact`]s per key.
//! [`History`] layers the history operations on top of any store, keyed by
//! [`ArtifactKind::storage_key`].

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::errors::Result;
use crate::model::{ArtifactKind, SavedArtifact};
use tracing::debug;

/// Key-value storage of artifact lists.
pub trait ArtifactStore: Send + Sync {
    /// Loads the list under `key`. A key never written yields an empty list.
    fn load(&self, key: &str) -> Result<Vec<SavedArtifact>>;

    /// Replaces the list under `key`.
    fn save(&self, key: &str, items: &[SavedArtifact]) -> Result<()>;
}

/// Newest-first history of saved drafts.
#[derive(Debug, Clone, Default)]
pub struct History<S> {
    store: S,
}

impl<S: ArtifactStore> History<S> {
    /// Wraps `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prepends `artifact` to the history of `kind`.
    pub fn save(&self, kind: ArtifactKind, artifact: SavedArtifact) -> Result<()> {
        let key = kind.storage_key();
        let mut items = self.store.load(key)?;
        debug!(key, id = %artifact.id, "Saving artifact");
        items.insert(0, artifact);
        self.store.save(key, &items)
    }

    /// Removes the artifact with `id`. Returns whether one was removed.
    pub fn delete(&self, kind: ArtifactKind, id: &str) -> Result<bool> {
        let key = kind.storage_key();
        let mut items = self.store.load(key)?;
        let before = items.len();
        items.retain(|a| a.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.store.save(key, &items)?;
        Ok(true)
    }

    /// Every artifact of `kind`, newest first.
    pub fn list(&self, kind: ArtifactKind) -> Result<Vec<SavedArtifact>> {
        self.store.load(kind.storage_key())
    }

    /// Artifacts whose title or topic contains `term`, ignoring case.
    pub fn search(&self, kind: ArtifactKind, term: &str) -> Result<Vec<SavedArtifact>> {
        Ok(self.list(kind)?.into_iter().filter(|a| a.matches(term)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn artifact(title: &str, topic: &str) -> SavedArtifact {
        SavedArtifact::new(title, topic, "Everyone", format!("{title} content"))
    }

    #[test]
    fn test_save_prepends() {
        let history = History::new(InMemoryStore::new());
        history.save(ArtifactKind::Script, artifact("First", "a")).unwrap();
        history.save(ArtifactKind::Script, artifact("Second", "b")).unwrap();

        let titles: Vec<String> = history.list(ArtifactKind::Script).unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Second".to_string(), "First".to_string()]);
    }

    #[test]
    fn test_kinds_are_separate() {
        let history = History::new(InMemoryStore::new());
        history.save(ArtifactKind::Blog, artifact("Post", "coffee")).unwrap();

        assert!(history.list(ArtifactKind::Script).unwrap().is_empty());
        assert_eq!(history.store().load("blog_history").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_id() {
        let history = History::new(InMemoryStore::new());
        let keep = artifact("Keep", "x");
        let drop = artifact("Drop", "y");
        let drop_id = drop.id.clone();
        history.save(ArtifactKind::Blog, keep.clone()).unwrap();
        history.save(ArtifactKind::Blog, drop).unwrap();

        assert!(history.delete(ArtifactKind::Blog, &drop_id).unwrap());
        assert!(!history.delete(ArtifactKind::Blog, &drop_id).unwrap());
        assert_eq!(history.list(ArtifactKind::Blog).unwrap(), vec![keep]);
    }

    #[test]
    fn test_search_title_or_topic() {
        let history = History::new(InMemoryStore::new());
        history.save(ArtifactKind::Script, artifact("Rust Tips", "programming")).unwrap();
        history.save(ArtifactKind::Script, artifact("Baking", "Sourdough")).unwrap();

        assert_eq!(history.search(ArtifactKind::Script, "rust").unwrap().len(), 1);
        assert_eq!(history.search(ArtifactKind::Script, "SOUR").unwrap()[0].title, "Baking");
        assert_eq!(history.search(ArtifactKind::Script, "").unwrap().len(), 2);
        assert!(history.search(ArtifactKind::Script, "python").unwrap().is_empty());
    }
}
