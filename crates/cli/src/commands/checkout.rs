//! Checkout command.
//!
//! Submits the cart as an order through the API boundary. The cart is
//! cleared only after the API confirms the order; a failed submission
//! leaves it intact for another try.

use thiserror::Error;

use retrovolt_client::{ApiClient, ApiError, OrderLine, OrderRequest};
use retrovolt_store::StoreContext;

/// Errors from the checkout command.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No session; orders require a signed-in account.
    #[error("Not signed in; run `retrovolt auth login` first")]
    NotSignedIn,

    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The API rejected the order or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Submit the cart as an order, then clear it on success.
pub async fn submit(ctx: &mut StoreContext, api: &ApiClient) -> Result<(), CheckoutError> {
    let token = ctx.session.token().ok_or(CheckoutError::NotSignedIn)?;
    if ctx.cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = OrderRequest {
        items: ctx.cart.lines().iter().map(OrderLine::from).collect(),
        total: ctx.cart.total(),
    };

    let order_id = api.submit_order(token, &order).await?;
    ctx.cart.clear();
    println!("Order {order_id} placed, total {}", order.total);
    Ok(())
}
