use super::ArtifactStore;
use crate::errors::{DraftflowError, Result};
use crate::model::SavedArtifact;
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each key as a JSON array in `{dir}/{key}.json`.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, write_lock: Mutex::new(()) })
    }

    /// Directory holding the history files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(DraftflowError::Storage(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ArtifactStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Vec<SavedArtifact>> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| DraftflowError::Storage(format!("corrupt history file {}: {e}", path.display())))
    }

    fn save(&self, key: &str, items: &[SavedArtifact]) -> Result<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(items).map_err(|e| DraftflowError::Serialization(e.to_string()))?;

        let _guard = self.write_lock.lock();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), count = items.len(), "History written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArtifactKind;
    use crate::storage::History;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let saved = SavedArtifact::new("Title", "Topic", "Audience", "Body");

        let history = History::new(JsonFileStore::open(dir.path()).unwrap());
        history.save(ArtifactKind::Script, saved.clone()).unwrap();
        drop(history);

        let reopened = History::new(JsonFileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.list(ArtifactKind::Script).unwrap(), vec![saved]);
        assert!(dir.path().join("script_history.json").exists());
    }

    #[test]
    fn test_file_uses_date_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.save("blog_history", &[SavedArtifact::new("T", "t", "a", "c")]).unwrap();

        let raw = fs::read_to_string(dir.path().join("blog_history.json")).unwrap();
        assert!(raw.contains("\"date\""));
    }

    #[test]
    fn test_missing_or_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested")).unwrap();
        assert!(store.load("script_history").unwrap().is_empty());

        fs::write(dir.path().join("nested").join("blog_history.json"), "  ").unwrap();
        assert!(store.load("blog_history").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blog_history.json"), "{not json").unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(store.load("blog_history"), Err(DraftflowError::Storage(_))));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(store.load("../escape"), Err(DraftflowError::Storage(_))));
    }
}
