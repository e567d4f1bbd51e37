//! Checkout entry point.
//!
//! Checkout is not processed here; shoppers see a sign-in placeholder.

use axum::Json;
use serde::Serialize;

/// Sign-in prompt shown instead of a checkout flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPlaceholder {
    pub title: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
}

pub const CHECKOUT_PLACEHOLDER: CheckoutPlaceholder = CheckoutPlaceholder {
    title: "Sign In / Sign Up",
    message: "Checkout requires an account. Sign-in is not available in this storefront yet.",
    action_label: "Got It",
};

/// Respond with the sign-in placeholder.
pub async fn show() -> Json<CheckoutPlaceholder> {
    Json(CHECKOUT_PLACEHOLDER)
}
