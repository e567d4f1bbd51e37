//! Client-side cart state.
//!
//! A [`Cart`] is an insertion-ordered set of [`CartLineItem`]s keyed by variant
//! ID. It is mutated only through [`CartAction`]s:
//!
//! - Adding a line whose ID is already present sums the quantities in place;
//!   the stored title, price and image from the first add are kept.
//! - Quantities are always positive. Setting a quantity to zero or less
//!   removes the line.
//! - Prices are never negative; such lines are not stored.
//! - Removing an absent line is a no-op.
//!
//! The serialized form is `{ "items": [ ... ] }` with camelCase fields, which
//! is what the storefront writes to its durable cart slot.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_VARIANT_TITLE, Product, ProductVariant};

/// A single line in the cart.
///
/// Title, image and price are snapshots taken when the line was first added;
/// they are not re-fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Purchasable variant ID, unique within a cart.
    pub id: String,
    /// Product display name.
    pub title: String,
    /// Variant display name; absent for a product's default variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_title: Option<String>,
    /// Image URL snapshot.
    pub image: Option<String>,
    /// Unit price snapshot, never negative.
    pub price: Decimal,
    /// Number of units, always greater than zero.
    pub quantity: u32,
}

impl CartLineItem {
    /// Build a line for `quantity` units of `variant`, denormalizing the
    /// product's display data.
    ///
    /// Uses the variant image when present, otherwise the product's featured
    /// image. The variant title is omitted for default variants.
    #[must_use]
    pub fn from_variant(product: &Product, variant: &ProductVariant, quantity: u32) -> Self {
        let variant_title = (!variant.title.is_empty() && variant.title != DEFAULT_VARIANT_TITLE)
            .then(|| variant.title.clone());
        let image = variant
            .image
            .as_ref()
            .or(product.featured_image.as_ref())
            .map(|img| img.url.clone());

        Self {
            id: variant.id.clone(),
            title: product.title.clone(),
            variant_title,
            image,
            price: variant.price.amount,
            quantity,
        }
    }

    /// Price of the whole line (`price × quantity`), saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| {
                tracing::warn!(id = %self.id, "Cart line total overflowed");
                Decimal::MAX
            })
    }
}

/// Commands that mutate a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Append a line, or merge its quantity into an existing line with the same ID.
    AddItem(CartLineItem),
    /// Delete the line with this ID.
    RemoveItem { id: String },
    /// Replace a line's quantity. Zero or less removes the line.
    UpdateQuantity { id: String, quantity: i64 },
}

/// Ordered collection of cart lines keyed by variant ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CartSnapshot", into = "CartSnapshot")]
pub struct Cart {
    items: IndexMap<String, CartLineItem>,
}

/// Wire shape of a cart: `{ "items": [...] }`.
#[derive(Serialize, Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action, returning whether the cart changed.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::AddItem(line) => self.merge_line(line),
            CartAction::RemoveItem { id } => self.items.shift_remove(&id).is_some(),
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    return self.items.shift_remove(&id).is_some();
                }
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                match self.items.get_mut(&id) {
                    Some(line) if line.quantity != quantity => {
                        line.quantity = quantity;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Add a line, merging with an existing line of the same ID.
    pub fn add_item(&mut self, line: CartLineItem) -> bool {
        self.apply(CartAction::AddItem(line))
    }

    /// Remove the line with this ID, if present.
    pub fn remove_item(&mut self, id: &str) -> bool {
        self.apply(CartAction::RemoveItem { id: id.to_string() })
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        self.apply(CartAction::UpdateQuantity {
            id: id.to_string(),
            quantity,
        })
    }

    fn merge_line(&mut self, line: CartLineItem) -> bool {
        if line.quantity == 0 {
            tracing::debug!(id = %line.id, "Ignoring cart line with zero quantity");
            return false;
        }
        if line.price.is_sign_negative() && !line.price.is_zero() {
            tracing::warn!(id = %line.id, price = %line.price, "Ignoring cart line with negative price");
            return false;
        }
        if let Some(existing) = self.items.get_mut(&line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.items.insert(line.id.clone(), line);
        }
        true
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.values()
    }

    /// Look up a line by variant ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.get(id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .values()
            .map(CartLineItem::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or_else(|| {
                tracing::warn!(lines = self.items.len(), "Cart subtotal overflowed");
                Decimal::MAX
            })
    }
}

// IndexMap equality ignores order; carts are only equal with the same line order.
impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

impl Eq for Cart {}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        let mut cart = Self::new();
        for line in snapshot.items {
            let id = line.id.clone();
            if !cart.merge_line(line) {
                tracing::warn!(id = %id, "Dropped invalid stored cart line");
            }
        }
        cart
    }
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_values().collect(),
        }
    }
}
