//! Requested purchase quantity with an optional stock limit.

/// Quantity control for a product page.
///
/// The quantity never drops below 1; removing a product entirely is a cart
/// operation, not something this control can do. When an upper bound is set
/// (the resolved variant's available stock) the quantity never exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    quantity: u32,
    max: Option<u32>,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self::new(1, None)
    }
}

impl QuantitySelector {
    /// Create a selector, clamping `initial` into range.
    #[must_use]
    pub fn new(initial: u32, max: Option<u32>) -> Self {
        let mut selector = Self { quantity: 1, max };
        selector.set(initial);
        selector
    }

    /// Current quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Current upper bound, if any.
    #[must_use]
    pub const fn max(&self) -> Option<u32> {
        self.max
    }

    /// Add one, stopping at the upper bound.
    pub fn increment(&mut self) {
        let next = self.quantity.saturating_add(1);
        self.quantity = match self.max {
            Some(max) => next.min(max).max(1),
            None => next,
        };
    }

    /// Subtract one, stopping at 1.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Change the upper bound, pulling the quantity down if it now exceeds it.
    pub fn set_max(&mut self, max: Option<u32>) {
        self.max = max;
        if let Some(max) = max
            && self.quantity > max
        {
            self.quantity = max.max(1);
        }
    }

    /// Set the quantity directly, clamped into `[1, max]`.
    pub fn set(&mut self, quantity: u32) {
        let quantity = quantity.max(1);
        self.quantity = match self.max {
            Some(max) => quantity.min(max).max(1),
            None => quantity,
        };
    }

    /// Back to 1, regardless of the current value.
    pub fn reset(&mut self) {
        self.quantity = 1;
    }
}
