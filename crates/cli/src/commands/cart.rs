//! Local cart commands.
//!
//! The cart lives in a [`FileStore`] under `CART_STORAGE_DIR`; every command
//! loads it, applies one change, and persists before exiting.

#![allow(clippy::print_stdout)]

use corner_shop_core::{Cart, CartLineItem, FreeShippingProgress, Product, VariantPicker};
use corner_shop_storefront::cart::{CartEvent, CartStore};
use corner_shop_storefront::config::CartConfig;
use corner_shop_storefront::storage::FileStore;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{CliError, storefront_client};

/// The persisted cart plus the threshold used for its shipping banner.
struct LocalCart {
    store: CartStore<FileStore>,
    free_shipping_threshold: Decimal,
}

impl LocalCart {
    fn open() -> Result<Self, CliError> {
        let config = CartConfig::from_env()?;
        info!(dir = %config.storage_dir.display(), "Opening cart");

        let mut store = CartStore::load(FileStore::new(config.storage_dir));
        store.subscribe(|event: &CartEvent, _cart: &Cart| {
            if let Some(notice) = event.notice() {
                println!("{notice}");
            }
        });

        Ok(Self {
            store,
            free_shipping_threshold: config.free_shipping_threshold,
        })
    }

    fn print(&self) {
        print_cart(self.store.cart(), self.free_shipping_threshold);
    }
}

/// Print cart lines, subtotal, and free-shipping progress.
///
/// # Errors
///
/// Returns an error if the cart configuration is invalid.
pub fn show() -> Result<(), CliError> {
    LocalCart::open()?.print();
    Ok(())
}

/// Resolve a variant of `handle` from option selections and add it.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched, an option or value is
/// unknown, no variant matches, or the variant is sold out.
pub async fn add(handle: &str, options: &[(String, String)], quantity: u32) -> Result<(), CliError> {
    let client = storefront_client()?;
    let detail = client.get_product_by_handle(handle).await?;

    let line = pick_line(detail.product, options, quantity)?;
    if line.quantity < quantity {
        warn!(requested = quantity, added = line.quantity, "Quantity limited by stock");
        println!("Only {} available; adding {}", line.quantity, line.quantity);
    }

    let mut cart = LocalCart::open()?;
    cart.store.add_item(line);
    cart.print();
    Ok(())
}

/// Remove a line. Removing a line that is not in the cart is not an error.
///
/// # Errors
///
/// Returns an error if the cart configuration is invalid.
pub fn remove(id: &str) -> Result<(), CliError> {
    let mut cart = LocalCart::open()?;
    cart.store.remove_item(id);
    cart.print();
    Ok(())
}

/// Set a line's quantity; zero or less removes the line.
///
/// # Errors
///
/// Returns an error if the cart configuration is invalid.
pub fn update(id: &str, quantity: i64) -> Result<(), CliError> {
    let mut cart = LocalCart::open()?;
    if cart.store.cart().get(id).is_none() {
        println!("No cart line with ID {id}");
    }
    cart.store.update_quantity(id, quantity);
    cart.print();
    Ok(())
}

/// Apply option selections to a product and build the cart line.
fn pick_line(
    product: Product,
    options: &[(String, String)],
    quantity: u32,
) -> Result<CartLineItem, CliError> {
    let mut picker = VariantPicker::new(product);

    for (name, value) in options {
        let option = picker
            .product()
            .options
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CliError::UnknownOption {
                product: picker.product().title.clone(),
                name: name.clone(),
                available: option_names(picker.product()),
            })?;
        let value = option
            .values
            .iter()
            .find(|v| v.eq_ignore_ascii_case(value))
            .ok_or_else(|| CliError::UnknownValue {
                name: option.name.clone(),
                value: value.clone(),
                available: option.values.join(", "),
            })?
            .clone();
        let name = option.name.clone();
        picker.choose(&name, &value);
    }

    picker.set_quantity(quantity);

    let Some(variant) = picker.selected_variant() else {
        let selection = picker
            .selections()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CliError::NoMatchingVariant {
            product: picker.product().title.clone(),
            selection,
        });
    };

    if !picker.can_add_to_cart() {
        let label = if variant.is_default() {
            picker.product().title.clone()
        } else {
            format!("{} ({})", picker.product().title, variant.title)
        };
        return Err(CliError::Unavailable(label));
    }

    picker
        .line_item()
        .ok_or_else(|| CliError::Unavailable(picker.product().title.clone()))
}

fn option_names(product: &Product) -> String {
    product
        .options
        .iter()
        .map(|o| o.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_cart(cart: &Cart, free_shipping_threshold: Decimal) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        let title = line.variant_title.as_deref().map_or_else(
            || line.title.clone(),
            |variant| format!("{} - {variant}", line.title),
        );
        println!(
            "{:<40} {:>4} x ${:.2} = ${:.2}  [{}]",
            title,
            line.quantity,
            line.price,
            line.line_total(),
            line.id
        );
    }

    let subtotal = cart.subtotal();
    println!();
    println!("Items: {}", cart.item_count());
    println!("Subtotal: ${subtotal:.2}");

    let progress = FreeShippingProgress::new(subtotal, free_shipping_threshold);
    if progress.is_visible() {
        println!("{} ({:.0}%)", progress.message(), progress.percentage());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_shop_core::{Price, PriceRange, ProductOption, ProductVariant, SelectedOption};

    use super::*;

    fn variant(id: &str, color: &str, size: &str, stock: Option<u32>) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: format!("{color} / {size}"),
            available_for_sale: stock != Some(0),
            quantity_available: stock,
            image: None,
            price: Price::new(Decimal::from(20), "USD"),
            selected_options: vec![
                SelectedOption::new("Color", color),
                SelectedOption::new("Size", size),
            ],
        }
    }

    fn tee() -> Product {
        Product {
            id: "p1".to_string(),
            handle: "classic-tee".to_string(),
            title: "Classic Tee".to_string(),
            description_html: None,
            available_for_sale: true,
            total_inventory: Some(5),
            featured_image: None,
            images: vec![],
            price_range: PriceRange {
                min_variant_price: Price::new(Decimal::from(20), "USD"),
            },
            options: vec![
                ProductOption {
                    id: "o1".to_string(),
                    name: "Color".to_string(),
                    values: vec!["Red".to_string(), "Blue".to_string()],
                },
                ProductOption {
                    id: "o2".to_string(),
                    name: "Size".to_string(),
                    values: vec!["S".to_string(), "M".to_string()],
                },
            ],
            variants: vec![
                variant("v-red-s", "Red", "S", Some(2)),
                variant("v-red-m", "Red", "M", Some(0)),
                variant("v-blue-s", "Blue", "S", None),
            ],
        }
    }

    fn opts(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_pick_line_defaults_and_clamps_to_stock() {
        let line = pick_line(tee(), &[], 5).unwrap();
        assert_eq!(line.id, "v-red-s");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.variant_title.as_deref(), Some("Red / S"));
    }

    #[test]
    fn test_pick_line_matches_case_insensitively() {
        let line = pick_line(tee(), &opts(&[("color", "blue")]), 3).unwrap();
        assert_eq!(line.id, "v-blue-s");
        assert_eq!(line.quantity, 3);
    }

    #[test]
    fn test_pick_line_sold_out() {
        let err = pick_line(tee(), &opts(&[("Size", "M")]), 1).unwrap_err();
        assert_eq!(err.to_string(), "Classic Tee (Red / M) is sold out");
    }

    #[test]
    fn test_pick_line_no_matching_variant() {
        let err = pick_line(tee(), &opts(&[("Color", "Blue"), ("Size", "M")]), 1).unwrap_err();
        assert!(matches!(err, CliError::NoMatchingVariant { .. }));
        assert_eq!(
            err.to_string(),
            "No variant of Classic Tee matches Color=Blue, Size=M"
        );
    }

    #[test]
    fn test_pick_line_unknown_option_and_value() {
        let err = pick_line(tee(), &opts(&[("Fabric", "Linen")]), 1).unwrap_err();
        assert!(matches!(err, CliError::UnknownOption { .. }));

        let err = pick_line(tee(), &opts(&[("Color", "Green")]), 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Color has no value \"Green\" (values: Red, Blue)"
        );
    }
}
