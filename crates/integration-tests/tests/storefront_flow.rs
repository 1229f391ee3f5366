//! Full storefront session: browse, sign in, build a cart, check out.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use retrovolt_integration_tests::{product, sign_in};
use retrovolt_store::StoreContext;

#[test]
fn anonymous_browsing_then_login_keeps_the_cart() {
    let mut ctx = StoreContext::in_memory();

    // cart fills up before any login, like a guest browsing the shop
    ctx.cart.add_item(&product("walkman", "Cassette walkman", "120"), 1);
    assert!(ctx.session.current_identity().is_none());

    sign_in(&mut ctx, "buyer@example.com");
    assert_eq!(ctx.cart.line_count(), 1);
    assert!(ctx.session.current_identity().is_some());
}

#[test]
fn checkout_clears_cart_but_keeps_session() {
    let mut ctx = StoreContext::in_memory();
    sign_in(&mut ctx, "buyer@example.com");

    ctx.cart.add_item(&product("console", "Game console", "1500"), 4);
    assert_eq!(ctx.cart.subtotal(), Decimal::from(6000));
    assert_eq!(ctx.cart.discount(), Decimal::from(600));
    assert_eq!(ctx.cart.total(), Decimal::from(5400));

    // the order was accepted upstream; the checkout flow clears the cart
    ctx.cart.clear();
    assert!(ctx.cart.is_empty());
    assert_eq!(ctx.cart.subtotal(), Decimal::ZERO);
    assert!(ctx.session.current_identity().is_some());
}

#[test]
fn logout_keeps_the_cart() {
    let mut ctx = StoreContext::in_memory();
    sign_in(&mut ctx, "buyer@example.com");
    ctx.cart.add_item(&product("radio", "Shortwave radio", "60"), 2);

    ctx.session.logout();
    assert!(ctx.session.current_identity().is_none());
    assert_eq!(ctx.cart.item_count(), 2);
}

#[test]
fn both_stores_notify_their_subscribers() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut ctx = StoreContext::in_memory();
    let events = Rc::new(RefCell::new(Vec::new()));

    {
        let events = Rc::clone(&events);
        ctx.session.subscribe(move |state| {
            events
                .borrow_mut()
                .push(format!("session:{}", state.is_some()));
        });
    }
    {
        let events = Rc::clone(&events);
        ctx.cart
            .subscribe(move |lines| events.borrow_mut().push(format!("cart:{}", lines.len())));
    }

    sign_in(&mut ctx, "buyer@example.com");
    ctx.cart.add_item(&product("deck", "Tape deck", "90"), 1);
    ctx.session.logout();

    assert_eq!(
        *events.borrow(),
        vec!["session:true", "cart:1", "session:false"]
    );
}
