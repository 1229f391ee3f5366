//! Durable local storage for store state.
//!
//! [`StorageBackend`] abstracts the raw key/value medium; [`FileStorage`]
//! keeps one JSON document per key under a data directory, and
//! [`MemoryStorage`] backs tests and ephemeral runs. [`Persisted`] layers
//! serde on top with one contract both stores rely on: loading never fails.
//! An absent key, unreadable file, or corrupt document yields the default
//! value, and a failed write is logged and swallowed because the in-memory
//! state stays authoritative for the rest of the process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage keys used by the stores.
///
/// Each store owns exactly one key; nothing else writes them.
pub mod keys {
    /// Key for the persisted cart line list.
    pub const CART: &str = "cart";

    /// Key for the persisted session (identity + token).
    pub const SESSION: &str = "session";
}

/// Errors from the raw storage medium.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the backing medium failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw key/value storage for serialized store state.
///
/// Implementations are synchronous and local; persistence is a fast write,
/// never a network call.
pub trait StorageBackend {
    /// Load the raw value for `key`, or `None` if the key has never been
    /// written (a cold start, not an error).
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write the raw value for `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

/// File-backed storage: one `<key>.json` document per key in a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created. Catching an
    /// unwritable data directory here, at startup, beats discovering it on
    /// the first mutation.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory holding the stored documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistError> {
        // write-then-rename so a crash mid-write can never leave a
        // truncated document behind
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any value is stored under `key`. Test helper.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// A serde-typed view of one storage key with graceful degradation.
///
/// Both stores use this identically, which is itself a contract: any store
/// built on `Persisted` starts cleanly from cold or corrupt storage and
/// survives write failures with memory as the source of truth.
pub struct Persisted<T> {
    backend: Rc<dyn StorageBackend>,
    key: &'static str,
    _value: PhantomData<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind a typed view to `key` on the given backend.
    pub fn new(backend: Rc<dyn StorageBackend>, key: &'static str) -> Self {
        Self {
            backend,
            key,
            _value: PhantomData,
        }
    }

    /// Load the stored value, or `T::default()` when the key is absent,
    /// unreadable, or fails to parse. Never an error to the caller.
    pub fn load(&self) -> T {
        let raw = match self.backend.load(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = self.key, "no stored value, starting from default");
                return T::default();
            }
            Err(err) => {
                warn!(key = self.key, error = %err, "failed to read stored value, starting from default");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = self.key, error = %err, "stored value is corrupt, starting from default");
                T::default()
            }
        }
    }

    /// Persist `value`. Failures are logged and swallowed; only durability
    /// is lost, the caller's in-memory state remains authoritative.
    pub fn save(&self, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = self.key, error = %err, "failed to serialize value, skipping persist");
                return;
            }
        };

        if let Err(err) = self.backend.store(self.key, &raw) {
            warn!(key = self.key, error = %err, "failed to persist value, in-memory state still authoritative");
        }
    }

    /// Remove the stored value. Failures are logged and swallowed.
    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(self.key) {
            warn!(key = self.key, error = %err, "failed to clear stored value");
        }
    }
}

/// Backend whose writes always fail, for exercising the swallow-on-failure
/// contract. Reads behave as cold storage.
#[cfg(test)]
pub(crate) struct FailingStorage;

#[cfg(test)]
impl StorageBackend for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }

    fn store(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Io(std::io::Error::from(
            ErrorKind::StorageFull,
        )))
    }

    fn remove(&self, _key: &str) -> Result<(), PersistError> {
        Err(PersistError::Io(std::io::Error::from(
            ErrorKind::PermissionDenied,
        )))
    }
}
