use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// Host-provided key-value persistence with single-key set semantics.
///
/// A `set` either replaces the whole value for `key` or fails; callers never
/// observe a partially written value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError>;
}

/// Error enumeration for substrate failures.
#[derive(Debug, thiserror::Error)]
pub enum SubstrateError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failure at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Process-local substrate, used by tests and ephemeral servers.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the substrate with an existing value, e.g. a blob written by an older session.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| SubstrateError::Unavailable("in-memory store poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| SubstrateError::Unavailable("in-memory store poisoned".to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<root>/<key>.json`.
///
/// Writes land in a temporary sibling file which is then renamed over the
/// target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file_stem}.json"))
    }

    fn io_error(path: &Path, source: io::Error) -> SubstrateError {
        SubstrateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(&path, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError> {
        fs::create_dir_all(&self.root).map_err(|err| Self::io_error(&self.root, err))?;

        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        {
            let mut file =
                fs::File::create(&staging).map_err(|err| Self::io_error(&staging, err))?;
            file.write_all(value.as_bytes())
                .and_then(|_| file.sync_all())
                .map_err(|err| Self::io_error(&staging, err))?;
        }
        fs::rename(&staging, &path).map_err(|err| Self::io_error(&path, err))?;

        debug!(path = %path.display(), bytes = value.len(), "substrate value replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trips_values() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("k").expect("get"), None);
        store.set("k", "[1]").expect("set");
        store.set("k", "[2]").expect("overwrite");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("[2]"));
    }

    #[test]
    fn file_store_reads_missing_key_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileKeyValueStore::new(dir.path().join("nested"));
        assert_eq!(store.get("quest-medical-templates").expect("get"), None);
    }

    #[test]
    fn file_store_replaces_whole_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        store.set("quest-medical-templates", "[\"first\"]").expect("set");
        store.set("quest-medical-templates", "[]").expect("overwrite");

        let path = store.path_for("quest-medical-templates");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_names_are_sanitized() {
        let store = FileKeyValueStore::new("/tmp/store");
        assert_eq!(
            store.path_for("../team/templates"),
            PathBuf::from("/tmp/store/.._team_templates.json")
        );
    }
}
