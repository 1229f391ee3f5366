//! The store context handed to every consumer.
//!
//! Constructed once at process start and passed explicitly; there is no
//! ambient global store. Lifecycle: restore at startup, mutate for the
//! session, clear through `session.logout()` / `cart.clear()`.

use std::rc::Rc;

use crate::cart::CartStore;
use crate::config::StoreConfig;
use crate::persist::{FileStorage, MemoryStorage, PersistError, StorageBackend};
use crate::session::SessionStore;

/// Both stores, restored from one storage backend.
pub struct StoreContext {
    /// Authenticated identity and bearer token.
    pub session: SessionStore,
    /// Shopping cart line items.
    pub cart: CartStore,
}

impl StoreContext {
    /// Restore both stores from file storage under the configured data
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created. Cold or
    /// corrupt store documents are not errors; they restore as empty.
    pub fn open(config: &StoreConfig) -> Result<Self, PersistError> {
        let backend = Rc::new(FileStorage::open(&config.data_dir)?);
        Ok(Self::with_backend(backend))
    }

    /// Restore both stores from an in-memory backend. State lives only for
    /// this process; used in tests and ephemeral runs.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Rc::new(MemoryStorage::new()))
    }

    /// Restore both stores from the given backend.
    #[must_use]
    pub fn with_backend(backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            session: SessionStore::restore(Rc::clone(&backend)),
            cart: CartStore::restore(backend),
        }
    }
}
