//! Catalog listing command.

use retrovolt_client::{ApiClient, ApiError};

/// Print the product catalog.
pub async fn list(api: &ApiClient) -> Result<(), ApiError> {
    let products = api.products().await?;
    if products.is_empty() {
        println!("No products listed");
        return Ok(());
    }

    for product in &products {
        println!("{:<26} {:<40} {:>10}", product.id, product.name, product.price);
    }
    Ok(())
}
