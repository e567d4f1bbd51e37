//! CLI command implementations.

pub mod cart;
pub mod catalog;

use corner_shop_storefront::config::{ConfigError, ShopifyStorefrontConfig};
use corner_shop_storefront::shopify::{ShopifyError, StorefrontClient};
use thiserror::Error;

/// Errors reported to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Shopify(#[from] ShopifyError),

    #[error("{product} has no option named {name:?} (options: {available})")]
    UnknownOption {
        product: String,
        name: String,
        available: String,
    },

    #[error("{name} has no value {value:?} (values: {available})")]
    UnknownValue {
        name: String,
        value: String,
        available: String,
    },

    #[error("No variant of {product} matches {selection}")]
    NoMatchingVariant { product: String, selection: String },

    #[error("{0} is sold out")]
    Unavailable(String),
}

/// Parse a `NAME=VALUE` option selection.
///
/// # Errors
///
/// Returns a message if there is no `=` or the name is empty.
pub fn parse_option_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Build a Storefront API client from the environment.
fn storefront_client() -> Result<StorefrontClient, CliError> {
    let config = ShopifyStorefrontConfig::from_env()?;
    Ok(StorefrontClient::new(&config))
}
