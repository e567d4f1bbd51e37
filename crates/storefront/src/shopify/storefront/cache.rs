//! Cache types for Storefront API responses.

use crate::shopify::types::{Product, ProductDetail};

/// Cached value types, keyed by `product:{handle}` or `products:{sort}:{reverse}`.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<ProductDetail>),
    Products(Vec<Product>),
}
