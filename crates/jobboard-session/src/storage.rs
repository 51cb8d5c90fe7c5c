//! Persistent key/value storage backing the session store.
//!
//! The session is kept as two independent entries, the bearer token under
//! [`TOKEN_KEY`] and the JSON-encoded user under [`USER_KEY`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::warn;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    io: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = lock(&self.io);
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = lock(&self.io);
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = lock(&self.io);
        let (mut entries, corrupt) = match self.load() {
            Ok(entries) => (entries, false),
            Err(StorageError::Json(e)) => {
                warn!(path = %self.path.display(), "Discarding corrupt session file: {}", e);
                (BTreeMap::new(), true)
            }
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries)?;
        }
        Ok(())
    }
}
