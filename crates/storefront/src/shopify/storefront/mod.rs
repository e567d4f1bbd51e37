//! Shopify Storefront API client implementation.
//!
//! Posts `graphql_client` query bodies with `reqwest` 0.13. Listings and
//! product pages are cached with `moka` (5-minute TTL); search results are not.

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, PathFragment, Response};
use moka::future::Cache;
use tracing::{debug, instrument};

use corner_shop_core::ProductSortKey;

use crate::config::{ShopifyStorefrontConfig, expose_token};
use crate::shopify::types::{Product, ProductDetail};
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError};

use cache::CacheValue;
use conversions::{convert_detail, convert_summary, pick_recommendations};
use queries::{
    GetProductByHandle, GetProducts, PAGE_SIZE, ProductByHandleVariables, ProductsVariables,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";
const LOG_BODY_LIMIT: usize = 500;
const ERROR_BODY_LIMIT: usize = 200;

/// Shopify search syntax matching a term as a title prefix or an exact tag.
#[must_use]
pub fn search_query(term: &str) -> String {
    let term = term.trim();
    format!("(title:{term}*) OR (tag:{term})")
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<String, CacheValue>,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a client for the configured store.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(config.endpoint(), expose_token(config))
    }

    /// Create a client posting to an explicit GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                access_token: access_token.into(),
                cache,
            }),
        }
    }

    /// The GraphQL endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %truncate(&response_text, LOG_BODY_LIMIT),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                truncate(&response_text, ERROR_BODY_LIMIT)
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %truncate(&response_text, LOG_BODY_LIMIT),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %truncate(&response_text, LOG_BODY_LIMIT),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or a price cannot be read.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        sort_key: ProductSortKey,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = format!("products:{sort_key}:{reverse}");

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = self.fetch_products(None, sort_key, reverse).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Search products by title prefix or tag. Results are never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or a price cannot be read.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_products(
        &self,
        term: &str,
        sort_key: ProductSortKey,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let products = self
            .fetch_products(Some(search_query(term)), sort_key, reverse)
            .await?;
        debug!(hits = products.len(), "Search completed");
        Ok(products)
    }

    async fn fetch_products(
        &self,
        query: Option<String>,
        sort_key: ProductSortKey,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let variables = ProductsVariables {
            first: PAGE_SIZE,
            query,
            sort_key,
            reverse,
        };

        let data = self.execute::<GetProducts>(variables).await?;

        data.products
            .into_nodes()
            .map(convert_summary)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ShopifyError::from)
    }

    /// Get a product page: the product and up to four related products.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if no product has this handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<ProductDetail, ShopifyError> {
        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(detail)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*detail);
        }

        let variables = ProductByHandleVariables {
            handle: handle.to_string(),
        };

        let data = self.execute::<GetProductByHandle>(variables).await?;

        let node = data
            .product
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        let (product, siblings) = convert_detail(node)?;
        let detail = ProductDetail {
            recommendations: pick_recommendations(&product.id, siblings),
            product,
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(detail.clone())))
            .await;

        Ok(detail)
    }
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: error.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    PathFragment::Key(s) => serde_json::Value::String(s),
                    PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_matches_title_prefix_or_tag() {
        assert_eq!(search_query("tee"), "(title:tee*) OR (tag:tee)");
        assert_eq!(search_query("  mug "), "(title:mug*) OR (tag:mug)");
    }

    #[test]
    fn test_with_endpoint() {
        let client = StorefrontClient::with_endpoint("http://localhost/graphql.json", "token");
        assert_eq!(client.endpoint(), "http://localhost/graphql.json");
    }
}
