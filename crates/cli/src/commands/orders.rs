//! Order history command.
//!
//! Reads the signed-in identity and token from the session store and asks
//! the API for that account's past orders.

use thiserror::Error;

use retrovolt_client::{ApiClient, ApiError};
use retrovolt_store::StoreContext;

/// Errors from the orders command.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// No session; order history requires a signed-in account.
    #[error("Not signed in; run `retrovolt auth login` first")]
    NotSignedIn,

    /// The API rejected the request or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Print the signed-in account's order history.
pub async fn list(ctx: &StoreContext, api: &ApiClient) -> Result<(), OrdersError> {
    let Some(identity) = ctx.session.current_identity() else {
        return Err(OrdersError::NotSignedIn);
    };
    let token = ctx.session.token().ok_or(OrdersError::NotSignedIn)?;

    let orders = api.orders(token, &identity.email).await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in &orders {
        println!("Order {} — {} — {}", order.id, order.date.format("%Y-%m-%d %H:%M"), order.status);
        for item in &order.items {
            println!("  {:>3} x {:<40} {:>10}", item.quantity, item.name, item.price);
        }
        println!("  Total: {}", order.total);
    }
    Ok(())
}
