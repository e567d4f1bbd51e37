//! Free-shipping progress for a cart subtotal.

use rust_decimal::Decimal;

/// Subtotal at which orders ship free, in the store currency.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// How far a subtotal is from the free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeShippingProgress {
    subtotal: Decimal,
    threshold: Decimal,
}

impl FreeShippingProgress {
    /// Progress of `subtotal` toward `threshold`.
    #[must_use]
    pub const fn new(subtotal: Decimal, threshold: Decimal) -> Self {
        Self {
            subtotal,
            threshold,
        }
    }

    /// Amount still needed; zero once the threshold is reached.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.threshold
            .checked_sub(self.subtotal)
            // Only a subtotal far below zero overflows here.
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO)
    }

    /// Whether the order already ships free.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Progress toward the threshold as a percentage in `[0, 100]`.
    #[must_use]
    pub fn percentage(&self) -> Decimal {
        if self.threshold <= Decimal::ZERO {
            return Decimal::ONE_HUNDRED;
        }
        let saturated = if self.subtotal > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        self.subtotal
            .checked_div(self.threshold)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(saturated)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Progress is hidden for an empty cart.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.subtotal > Decimal::ZERO
    }

    /// Banner text for the cart drawer.
    #[must_use]
    pub fn message(&self) -> String {
        if self.qualifies() {
            "Congratulations! You've got free shipping!".to_string()
        } else {
            format!(
                "You are ${:.2} away from free shipping!",
                self.remaining().round_dp(2)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(subtotal: i64) -> FreeShippingProgress {
        FreeShippingProgress::new(Decimal::from(subtotal), DEFAULT_FREE_SHIPPING_THRESHOLD)
    }

    #[test]
    fn test_default_threshold_is_fifty() {
        assert_eq!(DEFAULT_FREE_SHIPPING_THRESHOLD, Decimal::from(50));
    }

    #[test]
    fn test_partial_progress() {
        let p = progress(35);
        assert_eq!(p.remaining(), Decimal::from(15));
        assert_eq!(p.percentage(), Decimal::from(70));
        assert!(!p.qualifies());
        assert_eq!(p.message(), "You are $15.00 away from free shipping!");
    }

    #[test]
    fn test_over_threshold_caps_at_hundred() {
        let p = progress(80);
        assert_eq!(p.remaining(), Decimal::ZERO);
        assert_eq!(p.percentage(), Decimal::ONE_HUNDRED);
        assert!(p.qualifies());
        assert_eq!(p.message(), "Congratulations! You've got free shipping!");
    }

    #[test]
    fn test_empty_cart_hidden() {
        assert!(!progress(0).is_visible());
        assert!(progress(1).is_visible());
    }

    #[test]
    fn test_extreme_subtotals_saturate() {
        let p = FreeShippingProgress::new(Decimal::MAX, DEFAULT_FREE_SHIPPING_THRESHOLD);
        assert_eq!(p.percentage(), Decimal::ONE_HUNDRED);
        assert_eq!(p.remaining(), Decimal::ZERO);
        assert!(p.qualifies());

        let p = FreeShippingProgress::new(Decimal::MIN, DEFAULT_FREE_SHIPPING_THRESHOLD);
        assert_eq!(p.remaining(), Decimal::MAX);
        assert_eq!(p.percentage(), Decimal::ZERO);
        assert!(!p.qualifies());
        assert!(!p.is_visible());
    }

    #[test]
    fn test_zero_threshold_always_qualifies() {
        let p = FreeShippingProgress::new(Decimal::from(5), Decimal::ZERO);
        assert!(p.qualifies());
        assert_eq!(p.percentage(), Decimal::ONE_HUNDRED);
    }
}
