//! Cart store: ordered line items with merge-on-add.
//!
//! Policy, applied uniformly:
//! - adding a product already in the cart increments its quantity (additive
//!   merge) rather than duplicating or replacing the line;
//! - new lines are prepended, so the cart reads most-recently-added-first;
//! - `set_quantity` clamps below 1 up to 1; a line only leaves the cart
//!   through `remove_item` or `clear`;
//! - a zero quantity on `add_item` is normalized to 1, not rejected.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use retrovolt_core::ProductId;

use crate::persist::{Persisted, StorageBackend, keys};
use crate::pricing;
use crate::watch::{Subscribers, SubscriptionId};

/// A catalog product as returned by the shop API.
///
/// This is the cart's boundary input; only the fields the cart snapshots
/// are required, everything else stays upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque document ID minted by the API.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current listed price, in currency units.
    pub price: Decimal,
    /// Product image URL, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Short description, if any.
    #[serde(default)]
    pub description: Option<String>,
}

/// One product entry in the cart.
///
/// Name, price, and image are snapshotted from the product at add time and
/// never refreshed; the cart view stays stable even if the listing changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to; unique within the cart.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time, in currency units.
    pub unit_price: Decimal,
    /// Product image URL at add time.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of units; always at least 1.
    pub quantity: u32,
    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Holds the cart lines and persists them across restarts.
///
/// Lines are unique by product ID. Every mutator updates memory, persists
/// the full line list, then notifies subscribers; mutators that change
/// nothing (removing an absent line, clearing an empty cart) skip both.
pub struct CartStore {
    lines: Vec<CartLine>,
    persisted: Persisted<Vec<CartLine>>,
    subscribers: Subscribers<[CartLine]>,
}

impl CartStore {
    /// Restore the cart from storage, empty on cold or corrupt state.
    pub fn restore(backend: Rc<dyn StorageBackend>) -> Self {
        let persisted = Persisted::new(backend, keys::CART);
        let lines = persisted.load();
        Self {
            lines,
            persisted,
            subscribers: Subscribers::new(),
        }
    }

    /// Add `quantity` units of `product`. Merges with an existing line for
    /// the same product; otherwise prepends a new line with a snapshot of
    /// the product's display fields. A quantity of 0 counts as 1.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        debug!(product_id = %product.id, quantity, "cart add");

        match self.find_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.insert(0, CartLine::snapshot(product, quantity)),
        }
        self.sync();
    }

    /// Set the quantity of an existing line, clamped up to 1. Absent
    /// product IDs are a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        let Some(line) = self.find_mut(product_id) else {
            return;
        };
        if line.quantity == quantity {
            return;
        }
        debug!(%product_id, quantity, "cart set quantity");
        line.quantity = quantity;
        self.sync();
    }

    /// Remove the line for `product_id`. Idempotent; absent IDs are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != *product_id);
        if self.lines.len() != before {
            debug!(%product_id, "cart remove");
            self.sync();
        }
    }

    /// Empty the cart, as after a successful checkout. Idempotent.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        debug!("cart clear");
        self.lines.clear();
        self.sync();
    }

    /// The lines, most recently added first.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of line totals, before any discount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Discount on the current subtotal (see [`pricing`]).
    #[must_use]
    pub fn discount(&self) -> Decimal {
        pricing::discount_for(self.subtotal())
    }

    /// Amount due: subtotal minus discount.
    #[must_use]
    pub fn total(&self) -> Decimal {
        pricing::total_for(self.subtotal())
    }

    /// Register a callback invoked with the full line list after every
    /// change.
    pub fn subscribe(&mut self, callback: impl Fn(&[CartLine]) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == *product_id)
    }

    fn sync(&self) {
        self.persisted.save(&self.lines);
        self.subscribers.notify(&self.lines);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use rust_decimal::dec;

    use super::*;
    use crate::persist::MemoryStorage;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Refurbished {id}"),
            price,
            image: Some(format!("https://img.retrovolt.shop/{id}.jpg")),
            description: None,
        }
    }

    fn empty_cart() -> CartStore {
        CartStore::restore(Rc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_merges_quantities_for_same_product() {
        let mut cart = empty_cart();
        let walkman = product("walkman", dec!(120));
        cart.add_item(&walkman, 2);
        cart.add_item(&walkman, 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_total_quantity_is_order_independent() {
        let camera = product("camera", dec!(250));
        let deck = product("deck", dec!(90));

        let mut forward = empty_cart();
        forward.add_item(&camera, 1);
        forward.add_item(&deck, 2);
        forward.add_item(&camera, 4);

        let mut reversed = empty_cart();
        reversed.add_item(&camera, 4);
        reversed.add_item(&deck, 2);
        reversed.add_item(&camera, 1);

        for cart in [&forward, &reversed] {
            let camera_line = cart
                .lines()
                .iter()
                .find(|l| l.product_id == camera.id)
                .unwrap();
            let deck_line = cart
                .lines()
                .iter()
                .find(|l| l.product_id == deck.id)
                .unwrap();
            assert_eq!(camera_line.quantity, 5);
            assert_eq!(deck_line.quantity, 2);
        }
    }

    #[test]
    fn test_new_lines_are_prepended() {
        let mut cart = empty_cart();
        cart.add_item(&product("first", dec!(10)), 1);
        cart.add_item(&product("second", dec!(20)), 1);

        assert_eq!(cart.lines()[0].product_id, ProductId::new("second"));
        assert_eq!(cart.lines()[1].product_id, ProductId::new("first"));
    }

    #[test]
    fn test_zero_quantity_add_counts_as_one() {
        let mut cart = empty_cart();
        cart.add_item(&product("amp", dec!(300)), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_lines_snapshot_display_fields_at_add_time() {
        let mut cart = empty_cart();
        let mut vinyl = product("vinyl", dec!(40));
        cart.add_item(&vinyl, 1);

        // a later listing change must not touch the snapshotted line
        vinyl.price = dec!(55);
        vinyl.name = "Repriced".to_owned();
        cart.add_item(&vinyl, 1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].unit_price, dec!(40));
        assert_eq!(cart.lines()[0].name, "Refurbished vinyl");
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = empty_cart();
        let radio = product("radio", dec!(60));
        cart.add_item(&radio, 3);
        cart.set_quantity(&radio.id, 0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_absent_id_is_noop() {
        let mut cart = empty_cart();
        cart.set_quantity(&ProductId::new("ghost"), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_id_leaves_cart_unchanged() {
        let mut cart = empty_cart();
        cart.add_item(&product("tv", dec!(500)), 1);
        let before = cart.lines().to_vec();
        cart.remove_item(&ProductId::new("ghost"));
        assert_eq!(cart.lines(), before);
    }

    #[test]
    fn test_remove_then_remove_again_is_idempotent() {
        let mut cart = empty_cart();
        let tv = product("tv", dec!(500));
        cart.add_item(&tv, 1);
        cart.remove_item(&tv.id);
        cart.remove_item(&tv.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_then_subtotal_is_zero() {
        let mut cart = empty_cart();
        cart.add_item(&product("tv", dec!(500)), 2);
        cart.clear();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_discount_and_total() {
        let mut cart = empty_cart();
        cart.add_item(&product("console", dec!(1500)), 4);

        assert_eq!(cart.subtotal(), dec!(6000));
        assert_eq!(cart.discount(), dec!(600));
        assert_eq!(cart.total(), dec!(5400));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = empty_cart();
        cart.add_item(&product("a", dec!(1)), 2);
        cart.add_item(&product("b", dec!(1)), 3);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_cart_survives_restart() {
        let backend = Rc::new(MemoryStorage::new());
        let mut cart = CartStore::restore(Rc::clone(&backend) as Rc<dyn StorageBackend>);
        cart.add_item(&product("deck", dec!(90)), 2);
        let before = cart.lines().to_vec();

        let restored = CartStore::restore(backend);
        assert_eq!(restored.lines(), before);
    }

    #[test]
    fn test_corrupt_storage_restores_empty() {
        let backend = Rc::new(MemoryStorage::new());
        backend.store(keys::CART, "[{\"product_id\":").unwrap();
        let cart = CartStore::restore(backend);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        use crate::persist::FailingStorage;

        let notified = Rc::new(RefCell::new(0));
        let mut cart = CartStore::restore(Rc::new(FailingStorage));
        {
            let notified = Rc::clone(&notified);
            cart.subscribe(move |_| *notified.borrow_mut() += 1);
        }

        // every write to storage fails; the in-memory cart must not care
        let deck = product("deck", dec!(90));
        cart.add_item(&deck, 2);
        cart.set_quantity(&deck.id, 5);

        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal(), dec!(450));
        assert_eq!(*notified.borrow(), 2);
    }

    #[test]
    fn test_subscribers_notified_on_each_mutation() {
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let mut cart = empty_cart();
        {
            let snapshots = Rc::clone(&snapshots);
            cart.subscribe(move |lines| snapshots.borrow_mut().push(lines.len()));
        }

        let deck = product("deck", dec!(90));
        cart.add_item(&deck, 1);
        cart.set_quantity(&deck.id, 3);
        cart.remove_item(&deck.id);
        // no-op mutations do not notify
        cart.remove_item(&deck.id);
        cart.clear();

        assert_eq!(*snapshots.borrow(), vec![1, 1, 0]);
    }
}
