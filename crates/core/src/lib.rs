//! Corner Shop Core - Shared types and storefront logic.
//!
//! This crate provides the pieces of the storefront that carry real invariants:
//! - [`cart`] - Ordered cart lines with merge-on-duplicate semantics
//! - [`variant`] - Resolving selected options to a concrete product variant
//! - [`quantity`] - Requested purchase quantity bounded by available stock
//! - [`picker`] - Product page state combining variant resolution and quantity
//! - [`shipping`] - Free-shipping progress for a cart subtotal
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage, no
//! HTTP clients. Persistence of the cart and the catalog API live in the
//! `storefront` crate.
//!
//! # Modules
//!
//! - [`types`] - Prices, products, variants, and catalog sort keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod picker;
pub mod quantity;
pub mod shipping;
pub mod types;
pub mod variant;

pub use cart::{Cart, CartAction, CartLineItem};
pub use picker::VariantPicker;
pub use quantity::QuantitySelector;
pub use shipping::FreeShippingProgress;
pub use types::*;
pub use variant::{Selections, is_option_value_reachable, resolve_selected_variant, set_option};
