//! Catalog browsing commands.

#![allow(clippy::print_stdout)]

use corner_shop_core::{Product, ProductSortKey};
use tracing::info;

use super::{CliError, storefront_client};

/// List the first page of products.
///
/// # Errors
///
/// Returns an error if configuration is missing or the API request fails.
pub async fn list(sort: &str, reverse: bool) -> Result<(), CliError> {
    let client = storefront_client()?;
    let sort_key = ProductSortKey::parse(sort);
    info!(%sort_key, reverse, "Listing products");

    let products = client.get_products(sort_key, reverse).await?;
    print_products(&products);
    Ok(())
}

/// Search products by title prefix or tag.
///
/// # Errors
///
/// Returns an error if configuration is missing or the API request fails.
pub async fn search(term: &str, sort: &str, reverse: bool) -> Result<(), CliError> {
    let client = storefront_client()?;
    let products = client
        .search_products(term, ProductSortKey::parse(sort), reverse)
        .await?;

    if products.is_empty() {
        println!("No products found for \"{term}\"");
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

/// Show a product's options, variants, and recommendations.
///
/// # Errors
///
/// Returns an error if the product does not exist or the API request fails.
pub async fn show(handle: &str) -> Result<(), CliError> {
    let client = storefront_client()?;
    let detail = client.get_product_by_handle(handle).await?;
    let product = &detail.product;

    println!("{} ({})", product.title, product.handle);
    println!("From {}", product.price_range.min_variant_price);
    if !product.available_for_sale {
        println!("Sold out");
    }

    for option in &product.options {
        println!("{}: {}", option.name, option.values.join(", "));
    }

    println!();
    println!("Variants:");
    for variant in &product.variants {
        let stock = match (variant.is_purchasable(), variant.quantity_available) {
            (false, _) => "sold out".to_string(),
            (true, Some(n)) => format!("{n} in stock"),
            (true, None) => "available".to_string(),
        };
        println!("  {:<30} {:>10}  {stock}  [{}]", variant.title, variant.price.to_string(), variant.id);
    }

    if !detail.recommendations.is_empty() {
        println!();
        println!("You may also like:");
        print_products(&detail.recommendations);
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    for product in products {
        let status = if product.available_for_sale { "" } else { "  (sold out)" };
        println!(
            "{:<32} {:>10}  {}{status}",
            product.title,
            product.price_range.min_variant_price.to_string(),
            product.handle
        );
    }
}
