//! Integration tests for Corner Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```
//!
//! No network or database is needed: the Shopify Storefront API is served by
//! a local `wiremock` server and carts are written to temporary directories.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart Store round trips through `FileStore`
//! - `storefront_client` - GraphQL client against a mocked Storefront API
//! - `api_routes` - JSON routes driven with `tower::ServiceExt::oneshot`
//!
//! This library holds the fixtures those tests share.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use corner_shop_core::shipping::DEFAULT_FREE_SHIPPING_THRESHOLD;
use corner_shop_storefront::config::{CartConfig, ShopifyStorefrontConfig, StorefrontConfig};
use corner_shop_storefront::shopify::StorefrontClient;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Access token the mocked API expects.
pub const TEST_TOKEN: &str = "test-storefront-token";

/// API version used in the mocked endpoint path.
pub const TEST_API_VERSION: &str = "2024-04";

/// Path of the GraphQL endpoint on the mock server.
#[must_use]
pub fn graphql_path() -> String {
    format!("/api/{TEST_API_VERSION}/graphql.json")
}

/// A client posting to the mock server's GraphQL endpoint.
#[must_use]
pub fn mock_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_endpoint(format!("{}{}", server.uri(), graphql_path()), TEST_TOKEN)
}

/// Storefront configuration for tests, persisting carts under `storage_dir`.
#[must_use]
pub fn test_config(storage_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        shopify: ShopifyStorefrontConfig {
            store: "corner-shop-test.myshopify.com".to_string(),
            api_version: TEST_API_VERSION.to_string(),
            storefront_access_token: SecretString::from(TEST_TOKEN),
        },
        cart: CartConfig {
            storage_dir: storage_dir.to_path_buf(),
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Wrap a value as a successful GraphQL response body.
#[must_use]
pub fn graphql_data(data: Value) -> Value {
    json!({ "data": data })
}

/// A listing node as returned by the `ProductSummary` fragment.
#[must_use]
pub fn product_summary_json(id: &str, handle: &str, amount: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "title": format!("Product {id}"),
        "handle": handle,
        "availableForSale": true,
        "totalInventory": 12,
        "featuredImage": {
            "url": format!("https://cdn.shopify.com/{handle}.jpg"),
            "altText": null
        },
        "priceRange": {
            "minVariantPrice": { "amount": amount, "currencyCode": "USD" }
        }
    })
}

/// A `products` connection holding the given nodes.
#[must_use]
pub fn products_connection(nodes: Vec<Value>) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
    json!({ "products": { "edges": edges } })
}

/// A two-option product (Color x Size) whose collection holds `siblings`.
#[must_use]
pub fn product_detail_json(id: &str, handle: &str, siblings: Vec<Value>) -> Value {
    let variant = |vid: &str, color: &str, size: &str, stock: i64| {
        json!({
            "node": {
                "id": format!("gid://shopify/ProductVariant/{vid}"),
                "title": format!("{color} / {size}"),
                "availableForSale": stock > 0,
                "quantityAvailable": stock,
                "image": null,
                "price": { "amount": "25.00", "currencyCode": "USD" },
                "selectedOptions": [
                    { "name": "Color", "value": color },
                    { "name": "Size", "value": size }
                ]
            }
        })
    };

    let mut product = product_summary_json(id, handle, "25.00");
    let Some(fields) = product.as_object_mut() else {
        return product;
    };
    fields.insert("descriptionHtml".to_string(), json!("<p>Soft cotton</p>"));
    fields.insert("images".to_string(), json!({ "edges": [] }));
    fields.insert(
        "options".to_string(),
        json!([
            { "id": "gid://shopify/ProductOption/1", "name": "Color", "values": ["Red", "Blue"] },
            { "id": "gid://shopify/ProductOption/2", "name": "Size", "values": ["S", "M"] }
        ]),
    );
    fields.insert(
        "variants".to_string(),
        json!({
            "edges": [
                variant("11", "Red", "S", 3),
                variant("12", "Red", "M", 0),
                variant("13", "Blue", "S", 8)
            ]
        }),
    );
    fields.insert(
        "collections".to_string(),
        json!({ "edges": [{ "node": products_connection(siblings) }] }),
    );

    json!({ "product": product })
}
