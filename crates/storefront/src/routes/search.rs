//! Search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::SortQuery;
use crate::routes::products::ProductsResponse;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub term: Option<String>,
    pub sort_key: Option<String>,
    pub reverse: Option<String>,
}

/// Search products by title prefix or tag.
///
/// Responds 400 when `term` is missing.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ProductsResponse>> {
    let term = query
        .term
        .ok_or_else(|| AppError::BadRequest("Search term is required".to_string()))?;

    let sort = SortQuery {
        sort_key: query.sort_key,
        reverse: query.reverse,
    };

    let products = state
        .storefront()
        .search_products(&term, sort.sort_key(), sort.reverse())
        .await?;

    Ok(Json(ProductsResponse { products }))
}
