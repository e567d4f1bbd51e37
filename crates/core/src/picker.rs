//! Product page state: option selections, resolved variant, and quantity.

use crate::cart::CartLineItem;
use crate::quantity::QuantitySelector;
use crate::types::{Product, ProductVariant};
use crate::variant::{Selections, is_option_value_reachable, resolve_selected_variant, set_option};

/// Selection state for one product.
///
/// Loading a product rebuilds selections from each option's first value.
/// Whenever the resolved variant changes the requested quantity goes back to
/// 1 and its upper bound follows the new variant's available stock.
#[derive(Debug, Clone)]
pub struct VariantPicker {
    product: Product,
    selections: Selections,
    selected_variant_id: Option<String>,
    quantity: QuantitySelector,
}

impl VariantPicker {
    /// Start picking options for a product.
    #[must_use]
    pub fn new(product: Product) -> Self {
        let mut picker = Self {
            selections: Selections::defaults(&product.options),
            product,
            selected_variant_id: None,
            quantity: QuantitySelector::default(),
        };
        picker.sync_variant(true);
        picker
    }

    /// Switch to another product, discarding all prior selections.
    pub fn select_product(&mut self, product: Product) {
        self.selections = Selections::defaults(&product.options);
        self.product = product;
        self.sync_variant(true);
    }

    /// Choose a value for one option and return the newly resolved variant.
    pub fn choose(&mut self, option_name: &str, value: &str) -> Option<&ProductVariant> {
        self.selections = set_option(&self.selections, option_name, value);
        self.sync_variant(false);
        self.selected_variant()
    }

    fn sync_variant(&mut self, force_reset: bool) {
        let resolved = resolve_selected_variant(&self.selections, &self.product.variants);
        let resolved_id = resolved.map(|v| v.id.clone());
        let max = resolved.and_then(|v| v.quantity_available);

        if force_reset || resolved_id != self.selected_variant_id {
            tracing::trace!(variant = ?resolved_id, "Resolved variant changed");
            self.quantity.reset();
        }
        self.quantity.set_max(max);
        self.selected_variant_id = resolved_id;
    }

    /// The product being configured.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Current option selections.
    #[must_use]
    pub const fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Variant matching the current selections, if any.
    #[must_use]
    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        let id = self.selected_variant_id.as_deref()?;
        self.product.variants.iter().find(|v| v.id == id)
    }

    /// Whether `value` for `option_name` leads to a purchasable variant given
    /// the other current selections.
    #[must_use]
    pub fn is_reachable(&self, option_name: &str, value: &str) -> bool {
        is_option_value_reachable(option_name, value, &self.selections, &self.product.variants)
    }

    /// Requested quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.quantity()
    }

    /// Increase the requested quantity by one.
    pub fn increment(&mut self) {
        self.quantity.increment();
    }

    /// Decrease the requested quantity by one.
    pub fn decrement(&mut self) {
        self.quantity.decrement();
    }

    /// Set the requested quantity, clamped to stock.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity.set(quantity);
    }

    /// Whether the current selection can be added to the cart.
    #[must_use]
    pub fn can_add_to_cart(&self) -> bool {
        self.selected_variant()
            .is_some_and(ProductVariant::is_purchasable)
    }

    /// Cart line for the current selection and quantity.
    ///
    /// Returns `None` when the selection does not resolve to a purchasable
    /// variant.
    #[must_use]
    pub fn line_item(&self) -> Option<CartLineItem> {
        let variant = self.selected_variant().filter(|v| v.is_purchasable())?;
        Some(CartLineItem::from_variant(
            &self.product,
            variant,
            self.quantity(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Image, Price, PriceRange, ProductOption, SelectedOption};

    fn variant(id: &str, color: &str, size: &str, stock: u32) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: format!("{color} / {size}"),
            available_for_sale: stock > 0,
            quantity_available: Some(stock),
            image: None,
            price: Price::new(Decimal::from(15), "USD"),
            selected_options: vec![
                SelectedOption::new("Color", color),
                SelectedOption::new("Size", size),
            ],
        }
    }

    fn product(id: &str, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: id.to_string(),
            handle: format!("{id}-handle"),
            title: format!("Product {id}"),
            description_html: None,
            available_for_sale: true,
            total_inventory: None,
            featured_image: Some(Image {
                url: format!("https://cdn.example.com/{id}.png"),
                alt_text: None,
            }),
            images: Vec::new(),
            price_range: PriceRange {
                min_variant_price: Price::new(Decimal::from(15), "USD"),
            },
            options: vec![
                ProductOption {
                    id: "color".to_string(),
                    name: "Color".to_string(),
                    values: vec!["Red".to_string(), "Blue".to_string()],
                },
                ProductOption {
                    id: "size".to_string(),
                    name: "Size".to_string(),
                    values: vec!["S".to_string(), "M".to_string()],
                },
            ],
            variants,
        }
    }

    fn tee() -> Product {
        product(
            "tee",
            vec![
                variant("red-s", "Red", "S", 10),
                variant("red-m", "Red", "M", 2),
                variant("blue-s", "Blue", "S", 0),
                variant("blue-m", "Blue", "M", 4),
            ],
        )
    }

    #[test]
    fn test_new_selects_first_values() {
        let picker = VariantPicker::new(tee());
        assert_eq!(picker.selected_variant().unwrap().id, "red-s");
        assert_eq!(picker.quantity(), 1);
        assert!(picker.can_add_to_cart());
    }

    #[test]
    fn test_variant_change_resets_quantity() {
        let mut picker = VariantPicker::new(tee());
        picker.set_quantity(7);
        assert_eq!(picker.quantity(), 7);

        picker.choose("Color", "Blue");
        picker.choose("Size", "M");
        assert_eq!(picker.selected_variant().unwrap().id, "blue-m");
        assert_eq!(picker.quantity(), 1);
    }

    #[test]
    fn test_same_variant_keeps_quantity() {
        let mut picker = VariantPicker::new(tee());
        picker.set_quantity(3);
        picker.choose("Color", "Red");
        assert_eq!(picker.quantity(), 3);
    }

    #[test]
    fn test_bound_follows_resolved_variant() {
        let mut picker = VariantPicker::new(tee());
        picker.choose("Size", "M");
        for _ in 0..5 {
            picker.increment();
        }
        assert_eq!(picker.quantity(), 2);
    }

    #[test]
    fn test_sold_out_variant_cannot_be_added() {
        let mut picker = VariantPicker::new(tee());
        picker.choose("Color", "Blue");
        assert_eq!(picker.selected_variant().unwrap().id, "blue-s");
        assert!(!picker.can_add_to_cart());
        assert!(picker.line_item().is_none());
        assert!(!picker.is_reachable("Color", "Blue"));
        assert!(picker.is_reachable("Size", "M"));
    }

    #[test]
    fn test_missing_combination_disables_purchase() {
        let mut picker = VariantPicker::new(product(
            "mug",
            vec![variant("red-s", "Red", "S", 3), variant("blue-m", "Blue", "M", 3)],
        ));
        assert!(picker.choose("Color", "Blue").is_none());
        assert_eq!(picker.selections().get("Size"), Some("S"));
        assert!(!picker.can_add_to_cart());
        assert!(picker.line_item().is_none());
    }

    #[test]
    fn test_select_product_discards_selections() {
        let mut picker = VariantPicker::new(tee());
        picker.choose("Color", "Blue");
        picker.choose("Size", "M");
        picker.set_quantity(3);

        picker.select_product(product("hoodie", vec![variant("h-red-s", "Red", "S", 5)]));
        assert_eq!(picker.selections().get("Color"), Some("Red"));
        assert_eq!(picker.selected_variant().unwrap().id, "h-red-s");
        assert_eq!(picker.quantity(), 1);
    }

    #[test]
    fn test_line_item_snapshot() {
        let mut picker = VariantPicker::new(tee());
        picker.increment();
        let item = picker.line_item().unwrap();
        assert_eq!(item.id, "red-s");
        assert_eq!(item.title, "Product tee");
        assert_eq!(item.variant_title.as_deref(), Some("Red / S"));
        assert_eq!(item.image.as_deref(), Some("https://cdn.example.com/tee.png"));
        assert_eq!(item.quantity, 2);
    }
}
