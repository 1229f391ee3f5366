//! Bearer token credential type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token proving an identity to the shop API.
///
/// The token is issued by a successful auth response and attached verbatim
/// as an `Authorization: Bearer` header by the API client. It is persisted
/// alongside the identity it proves; the two are set and cleared together.
///
/// `Debug` redacts the token body so it never leaks into logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Expose the raw token for the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(***)")
    }
}
