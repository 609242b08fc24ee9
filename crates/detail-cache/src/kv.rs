//! Key-value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Type-safe key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. The file backend keeps one
/// `<key>.json` file per key in a directory; the memory backend is for
/// tests and ephemeral runs. Clones share the same storage.
#[derive(Clone, Debug)]
pub struct Cache {
    backend: Backend,
}

#[derive(Clone, Debug)]
enum Backend {
    File(PathBuf),
    Memory(Arc<Mutex<HashMap<String, Vec<u8>>>>),
}

impl Cache {
    /// Open (creating if needed) a directory-backed store.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| CacheError::OpenError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            backend: Backend::File(dir.to_path_buf()),
        })
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::default()),
        }
    }

    /// Directory backing this store, if any.
    pub fn location(&self) -> Option<&Path> {
        match &self.backend {
            Backend::File(dir) => Some(dir),
            Backend::Memory(_) => None,
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let bytes = match &self.backend {
            Backend::File(dir) => match fs::read(entry_path(dir, key)?) {
                Ok(bytes) => Some(bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            },
            Backend::Memory(map) => lock(map).get(key).cloned(),
        };

        match bytes {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        match &self.backend {
            Backend::File(dir) => {
                let path = entry_path(dir, key)?;
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, &bytes)?;
                fs::rename(&tmp, &path)?;
            }
            Backend::Memory(map) => {
                lock(map).insert(key.to_string(), bytes);
            }
        }
        Ok(())
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match &self.backend {
            Backend::File(dir) => match fs::remove_file(entry_path(dir, key)?) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => {
                lock(map).remove(key);
                Ok(())
            }
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match &self.backend {
            Backend::File(dir) => Ok(entry_path(dir, key)?.is_file()),
            Backend::Memory(map) => Ok(lock(map).contains_key(key)),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = match &self.backend {
            Backend::File(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(stem.to_string());
                    }
                }
                keys
            }
            Backend::Memory(map) => lock(map).keys().cloned().collect(),
        };
        keys.sort();
        Ok(keys)
    }
}

fn entry_path(dir: &Path, key: &str) -> Result<PathBuf, CacheError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(dir.join(format!("{key}.json")))
}

fn lock(
    map: &Mutex<HashMap<String, Vec<u8>>>,
) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
