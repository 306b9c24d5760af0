use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::core::{Result, TrackerError};

/// A string key value store, the shape of the storage a browser page or a
/// small desktop app has available.
pub trait KeyValueStorage {
    /// Read the value for `key`, `None` if it was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Storage that lives only as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage that keeps every key as a `<key>.json` file inside a directory.
///
/// The directory is created on the first write. Keys are used verbatim as
/// file names, so they can't be empty, `.`/`..` or contain a path
/// separator. Writes go through a temporary file in the same directory that
/// is renamed over the old one, so a crash never leaves a half written item.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    base_path: PathBuf,
}

impl DirectoryStorage {
    /// Creates a new `DirectoryStorage` rooted at `base_path`.
    pub fn new(base_path: PathBuf) -> Self {
        debug!(?base_path, "Creating DirectoryStorage");
        Self { base_path }
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let bad = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);
        if bad {
            return Err(TrackerError::InvalidStorageKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for DirectoryStorage {
    #[instrument(level = "trace", skip(self), fields(base_path = ?self.base_path))]
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    #[instrument(level = "trace", skip(self, value), fields(base_path = ?self.base_path))]
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if !self.base_path.exists() {
            debug!(?self.base_path, "Creating directory for storage");
            fs::create_dir_all(&self.base_path)?;
        }

        debug!(?path, bytes = value.len(), "Writing item");
        let mut file = NamedTempFile::new_in(&self.base_path)?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    #[instrument(level = "trace", skip(self), fields(base_path = ?self.base_path))]
    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
