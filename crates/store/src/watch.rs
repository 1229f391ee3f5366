//! Synchronous subscription plumbing.
//!
//! Views subscribe to a store and are called back with the new state after
//! every mutation, in subscription order, before the mutator returns. A
//! consumer therefore never observes state that is stale by one event.
//! Everything runs on the single UI execution context, so callbacks carry
//! no `Send` bound.

use tracing::trace;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscriber callbacks over a state snapshot `T`.
pub struct Subscribers<T: ?Sized> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Fn(&T)>)>,
}

impl<T: ?Sized> Subscribers<T> {
    /// Create an empty subscriber list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Drop the callback registered under `id`. Unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    /// Invoke every callback with the current state, in subscription order.
    pub fn notify(&self, state: &T) {
        trace!(subscribers = self.entries.len(), "notifying subscribers");
        for (_, callback) in &self.entries {
            callback(state);
        }
    }
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}
