//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Catalog
//! GET  /api/products           - Product listing (?sortKey&reverse)
//! GET  /api/products/{handle}  - Product detail with recommendations
//! GET  /api/search             - Product search (?term&sortKey&reverse)
//!
//! # Cart helpers
//! GET  /api/shipping           - Free-shipping progress (?subtotal)
//!
//! # Checkout
//! GET  /checkout               - Sign-in placeholder
//! ```

pub mod checkout;
pub mod products;
pub mod search;
pub mod shipping;

use axum::{Router, routing::get};
use serde::Deserialize;

use corner_shop_core::ProductSortKey;

use crate::state::AppState;

/// Catalog ordering query parameters shared by listing and search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortQuery {
    pub sort_key: Option<String>,
    pub reverse: Option<String>,
}

impl SortQuery {
    /// Requested sort key; unknown or missing keys mean relevance.
    #[must_use]
    pub fn sort_key(&self) -> ProductSortKey {
        self.sort_key
            .as_deref()
            .map_or(ProductSortKey::Relevance, ProductSortKey::parse)
    }

    /// Only the literal `true` reverses the order.
    #[must_use]
    pub fn reverse(&self) -> bool {
        self.reverse.as_deref() == Some("true")
    }
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{handle}", get(products::show))
        .route("/search", get(search::search))
        .route("/shipping", get(shipping::progress))
}

/// Liveness health check. Does not contact Shopify.
pub async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .route("/checkout", get(checkout::show))
}
