//! Integration tests for Retrovolt.
//!
//! These tests exercise the stores through [`StoreContext`] against real
//! file storage in a temporary directory, treating every context as one
//! process lifetime: restore, mutate, drop, restore again.
//!
//! # Test Categories
//!
//! - `storefront_flow` - login, cart building, checkout-clear, logout
//! - `persistence` - restart round-trips and corrupt-storage recovery

use rust_decimal::Decimal;

use retrovolt_core::{BearerToken, Email, ProductId, Role};
use retrovolt_store::{Identity, Product, StoreContext};

/// A catalog product fixture.
///
/// # Panics
///
/// Panics if `price` is not a valid decimal; fixture inputs are literals.
#[must_use]
pub fn product(id: &str, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: price.parse::<Decimal>().expect("literal price"),
        image: None,
        description: None,
    }
}

/// Sign `ctx` in as a regular user with a fixed token.
///
/// # Panics
///
/// Panics on an invalid literal email.
pub fn sign_in(ctx: &mut StoreContext, email: &str) {
    let identity = Identity::new(Email::parse(email).expect("literal email"), Role::User);
    ctx.session.login(identity, BearerToken::new("fixture-token"));
}
