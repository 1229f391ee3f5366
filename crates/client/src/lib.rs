//! Retrovolt Client - HTTP client for the shop API.
//!
//! The stores never touch the network; this crate is the request/response
//! boundary they sit behind. Callers authenticate here, then feed the
//! result into `SessionStore::login`; they submit orders here, then call
//! `CartStore::clear` on success. Authenticated endpoints take the bearer
//! token read from the session store and attach it as an `Authorization`
//! header.
//!
//! Wire shapes reuse the stores' boundary types ([`Product`], [`Identity`])
//! so a catalog response drops straight into `CartStore::add_item`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use retrovolt_core::{BearerToken, Email, OrderId};
use retrovolt_store::{CartLine, Identity, Product};

/// Errors from the shop API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("api returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: String,
    },

    /// A success response carried a body this client cannot parse.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Successful auth response: the identity and the token proving it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: BearerToken,
    /// The authenticated identity.
    pub user: Identity,
}

/// One line of an order submission, derived from a cart line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    /// Product being ordered.
    pub product_id: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price the buyer saw in the cart.
    pub unit_price: Decimal,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_str().to_owned(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// An order submission: the cart lines and the total the buyer was shown.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Lines being ordered.
    pub items: Vec<OrderLine>,
    /// Amount due after discount.
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    #[serde(rename = "_id")]
    id: OrderId,
}

/// One item of a past order, as echoed back by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    /// Product name at order time.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at order time.
    pub price: Decimal,
}

/// A past order in the account's history.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    /// Order ID minted by the API.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// The ordered items.
    pub items: Vec<OrderItem>,
    /// Amount charged.
    pub total: Decimal,
    /// Fulfillment status as reported by the shop (e.g. "pending",
    /// "shipped").
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Retrovolt shop API.
///
/// Cheaply cloneable; the `reqwest::Client` inside pools connections.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_owned();
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status
    /// (invalid credentials included).
    pub async fn login(&self, email: &Email, password: &str) -> Result<AuthResponse, ApiError> {
        debug!(%email, "api login");
        let response = self
            .inner
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Register a new account. The API logs the account in on success.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status.
    pub async fn register(&self, email: &Email, password: &str) -> Result<AuthResponse, ApiError> {
        debug!(%email, "api register");
        let response = self
            .inner
            .http
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.inner.http.get(self.url("/api/products")).send().await?;
        Self::decode(response).await
    }

    /// Submit an order. Requires a live token; the caller clears the cart
    /// only after this returns successfully.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status.
    pub async fn submit_order(
        &self,
        token: &BearerToken,
        order: &OrderRequest,
    ) -> Result<OrderId, ApiError> {
        debug!(lines = order.items.len(), "api submit order");
        let response = self
            .inner
            .http
            .post(self.url("/api/orders"))
            .bearer_auth(token.expose())
            .json(order)
            .send()
            .await?;

        let created: OrderResponse = Self::decode(response).await?;
        Ok(created.id)
    }

    /// Fetch the order history for `email`. Requires a live token.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-success status.
    pub async fn orders(
        &self,
        token: &BearerToken,
        email: &Email,
    ) -> Result<Vec<OrderSummary>, ApiError> {
        debug!(%email, "api order history");
        let response = self
            .inner
            .http
            .get(self.url(&format!("/api/orders/{email}")))
            .bearer_auth(token.expose())
            .send()
            .await?;

        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map_or_else(|_| status.to_string(), |body| body.message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
