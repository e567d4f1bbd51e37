//! GraphQL query definitions for the Shopify Storefront API.
//!
//! Each query is a marker type implementing [`GraphQLQuery`] by hand: the
//! document text, its variables, and the response shape it decodes into.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

use corner_shop_core::ProductSortKey;

/// Products per listing or search page.
pub const PAGE_SIZE: i64 = 20;

// =============================================================================
// Shared response shapes
// =============================================================================

/// Relay-style connection (`{ edges: [{ node }] }`).
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeNode {
    pub min_variant_price: MoneyV2,
}

/// Product fields shared by listings, search results and recommendations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub total_inventory: Option<i64>,
    pub featured_image: Option<ImageNode>,
    pub price_range: PriceRangeNode,
}

// Expands to a literal so it can be appended to query documents with `concat!`.
macro_rules! product_summary_fragment {
    () => {
        r"
fragment ProductSummary on Product {
  id
  title
  handle
  availableForSale
  totalInventory
  featuredImage { url altText }
  priceRange { minVariantPrice { amount currencyCode } }
}
"
    };
}

// =============================================================================
// GetProducts / SearchProducts
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsVariables {
    pub first: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub sort_key: ProductSortKey,
    pub reverse: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    pub products: Connection<ProductSummaryNode>,
}

/// Catalog listing and search (search sets `query`).
pub struct GetProducts;

impl GraphQLQuery for GetProducts {
    type Variables = ProductsVariables;
    type ResponseData = ProductsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_PRODUCTS_QUERY,
            operation_name: "GetProducts",
        }
    }
}

const GET_PRODUCTS_QUERY: &str = concat!(
    r"
query GetProducts($first: Int!, $query: String, $sortKey: ProductSortKeys, $reverse: Boolean) {
  products(first: $first, query: $query, sortKey: $sortKey, reverse: $reverse) {
    edges { node { ...ProductSummary } }
  }
}
",
    product_summary_fragment!()
);

// =============================================================================
// GetProductByHandle
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByHandleVariables {
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductByHandleData {
    pub product: Option<ProductDetailNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailNode {
    #[serde(flatten)]
    pub summary: ProductSummaryNode,
    pub description_html: Option<String>,
    pub images: Connection<ImageNode>,
    pub options: Vec<ProductOptionNode>,
    pub variants: Connection<VariantNode>,
    pub collections: Connection<CollectionNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductOptionNode {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    pub image: Option<ImageNode>,
    pub price: MoneyV2,
    pub selected_options: Vec<SelectedOptionNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOptionNode {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionNode {
    pub products: Connection<ProductSummaryNode>,
}

/// Product page: options, variants, images, and collection siblings.
pub struct GetProductByHandle;

impl GraphQLQuery for GetProductByHandle {
    type Variables = ProductByHandleVariables;
    type ResponseData = ProductByHandleData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_PRODUCT_BY_HANDLE_QUERY,
            operation_name: "GetProductByHandle",
        }
    }
}

const GET_PRODUCT_BY_HANDLE_QUERY: &str = concat!(
    r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    ...ProductSummary
    descriptionHtml
    images(first: 10) { edges { node { url altText } } }
    options { id name values }
    variants(first: 50) {
      edges {
        node {
          id
          title
          availableForSale
          quantityAvailable
          image { url altText }
          price { amount currencyCode }
          selectedOptions { name value }
        }
      }
    }
    collections(first: 1) {
      edges {
        node {
          products(first: 5, sortKey: RELEVANCE) {
            edges { node { ...ProductSummary } }
          }
        }
      }
    }
  }
}
",
    product_summary_fragment!()
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_include_fragment() {
        for document in [GET_PRODUCTS_QUERY, GET_PRODUCT_BY_HANDLE_QUERY] {
            assert!(document.contains("...ProductSummary"));
            assert!(document.contains("fragment ProductSummary on Product"));
        }
    }

    #[test]
    fn test_products_variables_serialize_camel_case() {
        let body = GetProducts::build_query(ProductsVariables {
            first: PAGE_SIZE,
            query: None,
            sort_key: ProductSortKey::BestSelling,
            reverse: true,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetProducts");
        assert_eq!(json["variables"]["sortKey"], "BEST_SELLING");
        assert_eq!(json["variables"]["reverse"], true);
        assert!(json["variables"].get("query").is_none());
    }

    #[test]
    fn test_detail_response_decodes() {
        let json = serde_json::json!({
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Tee",
                "handle": "tee",
                "availableForSale": true,
                "totalInventory": 4,
                "featuredImage": null,
                "priceRange": { "minVariantPrice": { "amount": "20.0", "currencyCode": "USD" } },
                "descriptionHtml": "<p>Soft</p>",
                "images": { "edges": [] },
                "options": [{ "id": "o1", "name": "Size", "values": ["S"] }],
                "variants": { "edges": [{ "node": {
                    "id": "v1",
                    "title": "S",
                    "availableForSale": true,
                    "quantityAvailable": 4,
                    "image": null,
                    "price": { "amount": "20.0", "currencyCode": "USD" },
                    "selectedOptions": [{ "name": "Size", "value": "S" }]
                } }] },
                "collections": { "edges": [] }
            }
        });
        let data: ProductByHandleData = serde_json::from_value(json).unwrap();
        let product = data.product.unwrap();
        assert_eq!(product.summary.handle, "tee");
        assert_eq!(product.variants.edges.len(), 1);
    }
}
