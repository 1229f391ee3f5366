//! User roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role carried in the authenticated identity.
///
/// The shop API issues `"user"` for regular customers and `"admin"` for
/// staff accounts that can reach the admin endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer account.
    #[default]
    User,
    /// Staff account with admin panel access.
    Admin,
}

impl Role {
    /// Whether this role grants access to admin operations.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}
