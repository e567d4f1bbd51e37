//! Type conversion functions for Shopify Storefront API responses.

pub mod products;

pub use products::{convert_detail, convert_summary, pick_recommendations};
