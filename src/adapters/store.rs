use crate::core::KeyValueStore;
use crate::utils::error::{BookingError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// String store persisted as a flat JSON object, rewritten on every change.
/// Batched writes go to disk in a single write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| BookingError::StorageError {
                    message: format!("{} is not a string map: {}", path.display(), e),
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// One file write for the whole batch; on failure the previous entries are kept.
    fn set_many(&mut self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        let previous = self.entries.clone();
        for (key, value) in entries {
            match value {
                Some(value) => {
                    self.entries.insert(key.to_string(), value.to_string());
                }
                None => {
                    self.entries.remove(*key);
                }
            }
        }

        if let Err(e) = self.flush() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("cookieConsent").unwrap(), None);
        store.set("cookieConsent", "all").unwrap();
        store.set("calendlyCookies", "true").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("cookieConsent").unwrap().as_deref(), Some("all"));
        assert_eq!(reopened.get("calendlyCookies").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_file_store_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("analyticsCookies", "false").unwrap();
        store.remove("analyticsCookies").unwrap();

        assert_eq!(FileStore::open(&path).unwrap().get("analyticsCookies").unwrap(), None);
    }

    #[test]
    fn test_set_many_writes_batch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("stale", "1").unwrap();
        store
            .set_many(&[("cookieConsent", Some("custom")), ("stale", None)])
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("cookieConsent").unwrap().as_deref(), Some("custom"));
        assert_eq!(reopened.get("stale").unwrap(), None);
    }

    #[test]
    fn test_failed_batch_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut store = FileStore::open(blocker.join("storage.json")).unwrap();
        let err = store
            .set_many(&[("cookieConsent", Some("all")), ("calendlyCookies", Some("true"))])
            .unwrap_err();

        assert!(matches!(err, BookingError::IoError(_)));
        assert_eq!(store.get("cookieConsent").unwrap(), None);
        assert_eq!(store.get("calendlyCookies").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, BookingError::StorageError { .. }));
    }
}
