//! Session store: authenticated identity and bearer token.
//!
//! The identity and the token that proves it live in one persisted record,
//! so they are set and cleared together. A stored record missing either
//! half fails to deserialize and the store restores as anonymous, which is
//! exactly the fallback an invalid session deserves.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use retrovolt_core::{BearerToken, Email, Role};

use crate::persist::{Persisted, StorageBackend, keys};
use crate::watch::{Subscribers, SubscriptionId};

/// Public attributes of the logged-in user, as issued by the auth endpoint.
///
/// Extra claims in the auth payload are carried through untouched so newer
/// API fields survive a round-trip through storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// The user's email address.
    pub email: Email,
    /// Role granted by the API; defaults to a regular user.
    #[serde(default)]
    pub role: Role,
    /// Any further claims from the auth payload, preserved verbatim.
    #[serde(flatten)]
    pub claims: BTreeMap<String, serde_json::Value>,
}

impl Identity {
    /// Identity with just an email and role, no extra claims.
    #[must_use]
    pub fn new(email: Email, role: Role) -> Self {
        Self {
            email,
            role,
            claims: BTreeMap::new(),
        }
    }
}

/// The persisted session record: an identity plus the token proving it.
///
/// Both fields are required; identity without a live credential is invalid
/// and must be treated as anonymous, which the deserializer enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated identity.
    pub identity: Identity,
    /// Bearer token for the API boundary; stored under the `credential`
    /// key in the persisted document.
    #[serde(rename = "credential")]
    pub token: BearerToken,
}

/// Holds the current session (or none) and persists it across restarts.
pub struct SessionStore {
    state: Option<Session>,
    persisted: Persisted<Option<Session>>,
    subscribers: Subscribers<Option<Session>>,
}

impl SessionStore {
    /// Restore the session from storage, anonymous on cold or corrupt state.
    pub fn restore(backend: Rc<dyn StorageBackend>) -> Self {
        let persisted = Persisted::new(backend, keys::SESSION);
        let state = persisted.load();
        Self {
            state,
            persisted,
            subscribers: Subscribers::new(),
        }
    }

    /// Record a successful login. Overwrites any current session, so
    /// repeated logins are idempotent. Persists before the caller regains
    /// control; a crash right after this call never loses the write.
    pub fn login(&mut self, identity: Identity, token: BearerToken) {
        debug!(email = %identity.email, role = %identity.role, "session login");
        let session = Some(Session { identity, token });
        self.persisted.save(&session);
        self.state = session;
        self.subscribers.notify(&self.state);
    }

    /// Clear the session from memory and storage. Idempotent.
    pub fn logout(&mut self) {
        debug!("session logout");
        self.persisted.clear();
        self.state = None;
        self.subscribers.notify(&self.state);
    }

    /// The current identity, or `None` when anonymous. Pure read.
    #[must_use]
    pub fn current_identity(&self) -> Option<&Identity> {
        self.state.as_ref().map(|session| &session.identity)
    }

    /// The current bearer token, for the API boundary to attach.
    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        self.state.as_ref().map(|session| &session.token)
    }

    /// Whether the current identity holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_identity()
            .is_some_and(|identity| identity.role.is_admin())
    }

    /// Register a callback invoked after every login/logout.
    pub fn subscribe(&mut self, callback: impl Fn(&Option<Session>) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}
