//! JSON-file-backed `KeyValueStore`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use heartline_core::error::DomainError;
use heartline_core::store::{KeyValueStore, StoreKey};

/// Durable store that rewrites a JSON object file on every change.
///
/// Keys are stored under their string names so the file stays readable.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store, and so is
    /// a file that does not hold a JSON object of strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&path, &contents),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::Store(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened durable store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, mutate: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::Store("file store lock poisoned".to_owned()))?;
        mutate(&mut entries);
        let body = serde_json::to_string_pretty(&*entries)
            .map_err(|e| DomainError::Store(format!("failed to encode store: {e}")))?;

        // Write-then-rename keeps the file whole if the process dies mid-write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| DomainError::Store(format!("failed to write {}: {e}", self.path.display())))
    }
}

fn parse_entries(path: &Path, contents: &str) -> BTreeMap<String, String> {
    match serde_json::from_str(contents) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding unreadable durable store");
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, DomainError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::Store("file store lock poisoned".to_owned()))?;
        Ok(entries.get(key.as_str()).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<(), DomainError> {
        self.update(|entries| {
            entries.insert(key.as_str().to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: StoreKey) -> Result<(), DomainError> {
        self.update(|entries| {
            entries.remove(key.as_str());
        })
    }
}
