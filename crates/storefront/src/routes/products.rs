//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::routes::SortQuery;
use crate::shopify::{Product, ProductDetail};
use crate::state::AppState;

/// Response body for product listings.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// List the first page of the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Json<ProductsResponse>> {
    let products = state
        .storefront()
        .get_products(query.sort_key(), query.reverse())
        .await?;

    Ok(Json(ProductsResponse { products }))
}

/// Show one product with its recommendations.
///
/// An unknown handle responds 404.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProductDetail>> {
    let detail = state.storefront().get_product_by_handle(&handle).await?;
    Ok(Json(detail))
}
