//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for catalog concepts shared by the
//! cart, the variant resolver, and the Shopify client.

pub mod price;
pub mod product;
pub mod sort;

pub use price::{Price, PriceError};
pub use product::{
    DEFAULT_VARIANT_TITLE, Image, PriceRange, Product, ProductOption, ProductVariant,
    SelectedOption,
};
pub use sort::ProductSortKey;
