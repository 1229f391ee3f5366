//! Core types for Retrovolt.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod token;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use token::BearerToken;
