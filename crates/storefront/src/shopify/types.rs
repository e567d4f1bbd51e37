//! Domain types returned by the Storefront API client.
//!
//! Catalog shapes (products, variants, prices) live in `corner-shop-core` so
//! the cart and variant resolver can use them without an HTTP stack; this
//! module re-exports them and adds the client-only aggregates.

use serde::{Deserialize, Serialize};

pub use corner_shop_core::types::{
    Image, Price, PriceRange, Product, ProductOption, ProductSortKey, ProductVariant,
    SelectedOption,
};

/// Maximum number of related products shown on a product page.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// A product page: the product plus related products from its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    /// The product with options, variants, and images.
    pub product: Product,
    /// Other products from the product's first collection.
    pub recommendations: Vec<Product>,
}
