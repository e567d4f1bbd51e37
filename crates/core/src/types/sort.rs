//! Catalog sort keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort keys accepted by the Shopify `products` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    #[default]
    Relevance,
    Title,
    Price,
    BestSelling,
    CreatedAt,
    UpdatedAt,
    ProductType,
    Vendor,
    Id,
}

impl ProductSortKey {
    /// Parse a sort key, falling back to `Relevance` for unknown input.
    ///
    /// Accepts the GraphQL enum spelling in any case, with `-` or `_`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "TITLE" => Self::Title,
            "PRICE" => Self::Price,
            "BEST_SELLING" => Self::BestSelling,
            "CREATED_AT" => Self::CreatedAt,
            "UPDATED_AT" => Self::UpdatedAt,
            "PRODUCT_TYPE" => Self::ProductType,
            "VENDOR" => Self::Vendor,
            "ID" => Self::Id,
            _ => Self::Relevance,
        }
    }

    /// GraphQL enum value for this key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "RELEVANCE",
            Self::Title => "TITLE",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
            Self::CreatedAt => "CREATED_AT",
            Self::UpdatedAt => "UPDATED_AT",
            Self::ProductType => "PRODUCT_TYPE",
            Self::Vendor => "VENDOR",
            Self::Id => "ID",
        }
    }
}

impl fmt::Display for ProductSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
