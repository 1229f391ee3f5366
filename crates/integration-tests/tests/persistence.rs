//! Restart round-trips and corrupt-storage recovery against file storage.

#![allow(clippy::unwrap_used)]

use std::fs;

use retrovolt_core::ProductId;
use retrovolt_integration_tests::{product, sign_in};
use retrovolt_store::{StoreConfig, StoreContext};

fn config_in(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig {
        data_dir: dir.path().to_path_buf(),
    }
}

#[test]
fn cart_and_session_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    {
        let mut ctx = StoreContext::open(&config).unwrap();
        sign_in(&mut ctx, "buyer@example.com");
        ctx.cart.add_item(&product("deck", "Tape deck", "90"), 2);
        ctx.cart.add_item(&product("amp", "Tube amp", "450"), 1);
    }

    // same directory, fresh process
    let ctx = StoreContext::open(&config).unwrap();
    assert_eq!(
        ctx.session.current_identity().map(|i| i.email.as_str()),
        Some("buyer@example.com")
    );
    assert_eq!(ctx.cart.line_count(), 2);
    assert_eq!(ctx.cart.lines()[0].product_id, ProductId::new("amp"));
    assert_eq!(ctx.cart.item_count(), 3);
}

#[test]
fn corrupt_documents_restore_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    {
        let mut ctx = StoreContext::open(&config).unwrap();
        sign_in(&mut ctx, "buyer@example.com");
        ctx.cart.add_item(&product("deck", "Tape deck", "90"), 2);
    }

    fs::write(dir.path().join("cart.json"), "[{\"half a line").unwrap();
    fs::write(dir.path().join("session.json"), "not json at all").unwrap();

    let ctx = StoreContext::open(&config).unwrap();
    assert!(ctx.cart.is_empty());
    assert!(ctx.session.current_identity().is_none());
}

#[test]
fn logout_removes_the_session_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let mut ctx = StoreContext::open(&config).unwrap();
    sign_in(&mut ctx, "buyer@example.com");
    assert!(dir.path().join("session.json").exists());

    ctx.session.logout();
    assert!(!dir.path().join("session.json").exists());

    let restored = StoreContext::open(&config).unwrap();
    assert!(restored.session.current_identity().is_none());
}

#[test]
fn mutations_are_durable_immediately_not_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let mut ctx = StoreContext::open(&config).unwrap();
    ctx.cart.add_item(&product("tv", "CRT television", "500"), 1);

    // read the document while the first context is still alive
    let raw = fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let lines: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(lines.as_array().map(Vec::len), Some(1));
}
