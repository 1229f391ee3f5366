//! Retrovolt Core - Shared types library.
//!
//! This crate provides common types used across all Retrovolt components:
//! - `store` - Session and cart state containers
//! - `client` - HTTP client for the shop API
//! - `cli` - Command-line storefront consumer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
