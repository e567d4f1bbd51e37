//! Product type conversion functions.

use corner_shop_core::PriceError;

use crate::shopify::types::{
    Image, MAX_RECOMMENDATIONS, Price, PriceRange, Product, ProductOption, ProductVariant,
    SelectedOption,
};

use super::super::queries::{
    ImageNode, MoneyV2, ProductDetailNode, ProductSummaryNode, VariantNode,
};

fn convert_money(money: &MoneyV2) -> Result<Price, PriceError> {
    Price::parse(&money.amount, money.currency_code.as_str())
}

fn convert_image(image: ImageNode) -> Image {
    Image {
        url: image.url,
        alt_text: image.alt_text,
    }
}

/// Convert a listing node. Summary products carry no options or variants.
///
/// # Errors
///
/// Returns `PriceError` if the minimum variant price cannot be parsed.
pub fn convert_summary(node: ProductSummaryNode) -> Result<Product, PriceError> {
    Ok(Product {
        price_range: PriceRange {
            min_variant_price: convert_money(&node.price_range.min_variant_price)?,
        },
        id: node.id,
        handle: node.handle,
        title: node.title,
        description_html: None,
        available_for_sale: node.available_for_sale,
        total_inventory: node.total_inventory,
        featured_image: node.featured_image.map(convert_image),
        images: Vec::new(),
        options: Vec::new(),
        variants: Vec::new(),
    })
}

/// Convert a product page node into the product and its collection siblings.
///
/// # Errors
///
/// Returns `PriceError` if any price in the product or its siblings cannot be parsed.
pub fn convert_detail(node: ProductDetailNode) -> Result<(Product, Vec<Product>), PriceError> {
    let mut product = convert_summary(node.summary)?;

    product.description_html = node.description_html;
    product.images = node.images.into_nodes().map(convert_image).collect();
    product.options = node
        .options
        .into_iter()
        .map(|o| ProductOption {
            id: o.id,
            name: o.name,
            values: o.values,
        })
        .collect();
    product.variants = node
        .variants
        .into_nodes()
        .map(convert_variant)
        .collect::<Result<_, _>>()?;

    let siblings = node
        .collections
        .into_nodes()
        .next()
        .map(|collection| {
            collection
                .products
                .into_nodes()
                .map(convert_summary)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok((product, siblings))
}

fn convert_variant(node: VariantNode) -> Result<ProductVariant, PriceError> {
    Ok(ProductVariant {
        price: convert_money(&node.price)?,
        id: node.id,
        title: node.title,
        available_for_sale: node.available_for_sale,
        // Shopify reports oversold stock as a negative count.
        quantity_available: node
            .quantity_available
            .map(|q| u32::try_from(q).unwrap_or(if q < 0 { 0 } else { u32::MAX })),
        image: node.image.map(convert_image),
        selected_options: node
            .selected_options
            .into_iter()
            .map(|o| SelectedOption::new(o.name, o.value))
            .collect(),
    })
}

/// Related products for a product page: siblings other than the product itself.
#[must_use]
pub fn pick_recommendations(product_id: &str, siblings: Vec<Product>) -> Vec<Product> {
    siblings
        .into_iter()
        .filter(|p| p.id != product_id)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::shopify::storefront::queries::{
        CollectionNode, Connection, Edge, PriceRangeNode, ProductOptionNode, SelectedOptionNode,
    };

    fn money(amount: &str) -> MoneyV2 {
        MoneyV2 {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn connection<T>(nodes: Vec<T>) -> Connection<T> {
        Connection {
            edges: nodes.into_iter().map(|node| Edge { node }).collect(),
        }
    }

    fn summary(id: &str) -> ProductSummaryNode {
        ProductSummaryNode {
            id: id.to_string(),
            title: format!("Product {id}"),
            handle: id.to_lowercase(),
            available_for_sale: true,
            total_inventory: Some(10),
            featured_image: Some(ImageNode {
                url: format!("https://cdn.example.test/{id}.jpg"),
                alt_text: None,
            }),
            price_range: PriceRangeNode {
                min_variant_price: money("12.50"),
            },
        }
    }

    fn variant(id: &str, quantity: Option<i64>) -> VariantNode {
        VariantNode {
            id: id.to_string(),
            title: "Red / M".to_string(),
            available_for_sale: true,
            quantity_available: quantity,
            image: None,
            price: money("12.50"),
            selected_options: vec![
                SelectedOptionNode {
                    name: "Color".to_string(),
                    value: "Red".to_string(),
                },
                SelectedOptionNode {
                    name: "Size".to_string(),
                    value: "M".to_string(),
                },
            ],
        }
    }

    fn detail(id: &str, siblings: Vec<ProductSummaryNode>) -> ProductDetailNode {
        ProductDetailNode {
            summary: summary(id),
            description_html: Some("<p>Soft cotton</p>".to_string()),
            images: connection(vec![]),
            options: vec![ProductOptionNode {
                id: "opt-1".to_string(),
                name: "Color".to_string(),
                values: vec!["Red".to_string()],
            }],
            variants: connection(vec![variant("v1", Some(3)), variant("v2", Some(-2))]),
            collections: connection(vec![CollectionNode {
                products: connection(siblings),
            }]),
        }
    }

    #[test]
    fn test_convert_summary() {
        let product = convert_summary(summary("P1")).unwrap();
        assert_eq!(product.handle, "p1");
        assert_eq!(
            product.price_range.min_variant_price.amount,
            Decimal::new(1250, 2)
        );
        assert!(product.variants.is_empty());
        assert!(product.featured_image.is_some());
    }

    #[test]
    fn test_convert_summary_rejects_bad_price() {
        let mut node = summary("P1");
        node.price_range.min_variant_price = money("twelve");
        assert!(convert_summary(node).is_err());
    }

    #[test]
    fn test_convert_detail() {
        let (product, siblings) = convert_detail(detail("P1", vec![summary("P2")])).unwrap();
        assert_eq!(product.options.len(), 1);
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[0].quantity_available, Some(3));
        assert_eq!(product.variants[1].quantity_available, Some(0));
        assert_eq!(
            product.variants[0].selected_options[1],
            SelectedOption::new("Size", "M")
        );
        assert_eq!(product.description_html.as_deref(), Some("<p>Soft cotton</p>"));
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn test_convert_detail_without_collections() {
        let mut node = detail("P1", vec![]);
        node.collections = connection(vec![]);
        let (_, siblings) = convert_detail(node).unwrap();
        assert!(siblings.is_empty());
    }

    #[test]
    fn test_pick_recommendations_excludes_self_and_caps() {
        let siblings = ["P1", "P2", "P3", "P4", "P5", "P6"]
            .into_iter()
            .map(|id| convert_summary(summary(id)).unwrap())
            .collect();
        let picked = pick_recommendations("P1", siblings);
        let ids: Vec<_> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["P2", "P3", "P4", "P5"]);
    }
}
