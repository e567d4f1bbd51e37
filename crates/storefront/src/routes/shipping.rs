//! Free-shipping progress for the cart drawer.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use corner_shop_core::FreeShippingProgress;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShippingQuery {
    pub subtotal: Option<String>,
}

/// Progress toward free shipping, ready to render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingResponse {
    pub subtotal: Decimal,
    pub threshold: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub qualifies: bool,
    pub visible: bool,
    pub message: String,
}

impl ShippingResponse {
    fn new(subtotal: Decimal, threshold: Decimal) -> Self {
        let progress = FreeShippingProgress::new(subtotal, threshold);
        Self {
            subtotal,
            threshold,
            remaining: progress.remaining(),
            percentage: progress.percentage(),
            qualifies: progress.qualifies(),
            visible: progress.is_visible(),
            message: progress.message(),
        }
    }
}

/// A missing or empty subtotal counts as an empty cart; a negative one is rejected.
pub async fn progress(
    State(state): State<AppState>,
    Query(query): Query<ShippingQuery>,
) -> Result<Json<ShippingResponse>> {
    let subtotal = match query.subtotal.as_deref().map(str::trim) {
        None | Some("") => Decimal::ZERO,
        Some(raw) => Decimal::from_str(raw)
            .map_err(|_| AppError::BadRequest(format!("Invalid subtotal: {raw}")))?,
    };
    if subtotal.is_sign_negative() && !subtotal.is_zero() {
        return Err(AppError::BadRequest(format!(
            "Subtotal must not be negative: {subtotal}"
        )));
    }

    Ok(Json(ShippingResponse::new(
        subtotal,
        state.free_shipping_threshold(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_below_threshold() {
        let response = ShippingResponse::new(Decimal::from(35), Decimal::from(50));
        assert_eq!(response.remaining, Decimal::from(15));
        assert!(!response.qualifies);
        assert!(response.visible);
        assert_eq!(response.message, "You are $15.00 away from free shipping!");
    }

    #[test]
    fn test_response_for_largest_subtotal() {
        let response = ShippingResponse::new(Decimal::MAX, Decimal::from(50));
        assert_eq!(response.percentage, Decimal::ONE_HUNDRED);
        assert_eq!(response.remaining, Decimal::ZERO);
        assert!(response.qualifies);
    }

    #[test]
    fn test_response_empty_cart_hidden() {
        let response = ShippingResponse::new(Decimal::ZERO, Decimal::from(50));
        assert!(!response.visible);
        assert_eq!(response.percentage, Decimal::ZERO);
    }
}
