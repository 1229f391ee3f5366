//! Cart commands: add, set-qty, remove, show, clear.
//!
//! `add` fetches the catalog so the store can snapshot the product's
//! display fields at add time; every other command is a pure store
//! operation.

use thiserror::Error;

use retrovolt_client::{ApiClient, ApiError};
use retrovolt_core::ProductId;
use retrovolt_store::StoreContext;

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The product ID is not in the catalog.
    #[error("Product not found in catalog: {0}")]
    ProductNotFound(ProductId),

    /// The API rejected the request or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Add `qty` units of a catalog product to the cart.
pub async fn add(
    ctx: &mut StoreContext,
    api: &ApiClient,
    product_id: &str,
    qty: u32,
) -> Result<(), CartCommandError> {
    let product_id = ProductId::new(product_id);
    let catalog = api.products().await?;
    let product = catalog
        .iter()
        .find(|p| p.id == product_id)
        .ok_or(CartCommandError::ProductNotFound(product_id))?;

    ctx.cart.add_item(product, qty);
    println!("Added {} x{}", product.name, qty.max(1));
    Ok(())
}

/// Change the quantity of an existing line.
pub fn set_qty(ctx: &mut StoreContext, product_id: &str, qty: u32) {
    ctx.cart.set_quantity(&ProductId::new(product_id), qty);
    show(ctx);
}

/// Remove a line; absent IDs are a quiet no-op.
pub fn remove(ctx: &mut StoreContext, product_id: &str) {
    ctx.cart.remove_item(&ProductId::new(product_id));
    show(ctx);
}

/// Print the cart lines with subtotal, discount, and total.
pub fn show(ctx: &StoreContext) {
    if ctx.cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in ctx.cart.lines() {
        println!(
            "{:>3} x {:<40} {:>10} {:>12}",
            line.quantity,
            line.name,
            line.unit_price,
            line.line_total()
        );
    }
    println!("Subtotal: {}", ctx.cart.subtotal());
    let discount = ctx.cart.discount();
    if !discount.is_zero() {
        println!("Discount: -{discount}");
    }
    println!("Total:    {}", ctx.cart.total());
}

/// Empty the cart.
pub fn clear(ctx: &mut StoreContext) {
    ctx.cart.clear();
    println!("Cart cleared");
}
