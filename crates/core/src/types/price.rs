//! Type-safe price representation using decimal arithmetic.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when reading a price from the catalog API.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Invalid price amount {0:?}: {1}")]
    InvalidAmount(String, rust_decimal::Error),
    #[error("Negative price amount: {0}")]
    Negative(Decimal),
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD").
    pub currency_code: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Parse a price from Shopify's decimal string representation.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the amount is not a decimal or is negative.
    pub fn parse(amount: &str, currency_code: impl Into<String>) -> Result<Self, PriceError> {
        let value = Decimal::from_str(amount.trim())
            .map_err(|e| PriceError::InvalidAmount(amount.to_string(), e))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative(value));
        }
        Ok(Self::new(value, currency_code))
    }

    /// Currency symbol used for display, if the currency has a well-known one.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.currency_code.as_str() {
            "USD" | "CAD" | "AUD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            _ => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.round_dp(2);
        match self.symbol() {
            Some(symbol) => write!(f, "{symbol}{amount:.2}"),
            None => write!(f, "{amount:.2} {}", self.currency_code),
        }
    }
}
