//! JSON-file credential store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use zwatch_core::store::CredentialStore;
use zwatch_core::{Result, ZWatchError};

const FILE_NAME: &str = "credentials.json";

/// Default location: `$XDG_CONFIG_HOME/zwatch` or `~/.config/zwatch`
pub fn default_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("zwatch").join(FILE_NAME)
}

/// Flat string map persisted as a JSON object
///
/// The file is re-read on every access so separate invocations see each
/// other's changes. A missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ZWatchError::Storage(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| ZWatchError::Storage(format!("Corrupt store {:?}: {}", self.path, e)))
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ZWatchError::Storage(format!("Failed to create {:?}: {}", parent, e))
            })?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)
            .map_err(|e| ZWatchError::Storage(format!("Failed to write {:?}: {}", self.path, e)))
    }

    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| ZWatchError::Storage(format!("store lock poisoned: {}", e)))?;
        let mut entries = self.read()?;
        change(&mut entries);
        self.write(&entries)
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!("Storing '{}' in {:?}", key, self.path);
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
