//! Catalog product types.
//!
//! These are the clean domain shapes the storefront works with, separate from
//! the raw GraphQL response shapes the Shopify client decodes.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Title Shopify gives the single variant of a product without options.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Price,
}

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

impl SelectedOption {
    /// Create a new name/value pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option ID.
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values in display order (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Quantity available (absent when inventory is not tracked).
    pub quantity_available: Option<u32>,
    /// Variant image.
    pub image: Option<Image>,
    /// Current price.
    pub price: Price,
    /// One pair per option defined on the product.
    pub selected_options: Vec<SelectedOption>,
}

impl ProductVariant {
    /// Whether this is the sole variant of a product without options.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.title == DEFAULT_VARIANT_TITLE
    }

    /// Whether the variant can currently be purchased.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.available_for_sale && self.quantity_available != Some(0)
    }
}

/// A product in the store.
///
/// Listing queries leave `options`, `variants` and `images` empty; the detail
/// query fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// HTML description.
    pub description_html: Option<String>,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Total inventory across variants.
    pub total_inventory: Option<i64>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images.
    pub images: Vec<Image>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
}
