//! Retrovolt Store - session and cart state containers.
//!
//! This crate is the storefront's client-side state core: it holds the
//! authenticated identity and the shopping cart, persists both across
//! restarts, and keeps every consumer in sync.
//!
//! # Architecture
//!
//! Two stores share one pattern: an in-memory state value, a [`Persisted`]
//! handle that writes it to durable local storage on every mutation, and a
//! subscriber list notified synchronously after each change. Consumers read
//! state and subscribe freely but may only change it through the documented
//! mutators; nothing else writes the storage keys.
//!
//! Control flow for every mutation:
//!
//! ```text
//! caller → store mutator → in-memory update → persist → notify subscribers
//! ```
//!
//! The stores perform no network I/O. Auth responses and order submissions
//! happen at the API boundary (`retrovolt-client`); callers feed the results
//! into [`SessionStore::login`], [`SessionStore::logout`], and
//! [`CartStore::clear`].
//!
//! Everything is single-threaded by design: mutations happen on one
//! execution context in response to discrete events, so the stores take
//! `&mut self` and subscribers need no `Send` bound. Concurrent writers to
//! the same storage keys from other processes race last-write-wins and are
//! out of scope.
//!
//! # Modules
//!
//! - [`persist`] - storage backends and the never-throw [`Persisted`] helper
//! - [`session`] - [`SessionStore`]: identity + bearer token
//! - [`cart`] - [`CartStore`]: line items with merge-on-add
//! - [`pricing`] - subtotal discount rules
//! - [`watch`] - synchronous subscription plumbing
//! - [`context`] - [`StoreContext`], the one object consumers receive
//! - [`config`] - environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod context;
pub mod persist;
pub mod pricing;
pub mod session;
pub mod watch;

pub use cart::{CartLine, CartStore, Product};
pub use config::{ConfigError, StoreConfig};
pub use context::StoreContext;
pub use persist::{FileStorage, MemoryStorage, PersistError, Persisted, StorageBackend};
pub use session::{Identity, Session, SessionStore};
pub use watch::{Subscribers, SubscriptionId};
