//! Quantity staging before an add-to-cart action.

use std::collections::HashMap;

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Quantities chosen on product cards but not yet added to the cart.
///
/// Every product starts at 1 and never drops below it. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct PendingQuantities {
    staged: HashMap<ProductId, i64>,
}

impl PendingQuantities {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the staged quantity for a product, floored at 1.
    ///
    /// Returns the new staged quantity.
    pub fn stage(&mut self, product: &ProductId, delta: i64) -> i64 {
        let entry = self.staged.entry(product.clone()).or_insert(1);
        *entry = entry.saturating_add(delta).max(1);
        *entry
    }

    /// Currently staged quantity (1 if nothing was staged).
    pub fn get(&self, product: &ProductId) -> i64 {
        self.staged.get(product).copied().unwrap_or(1)
    }

    /// Return the staged quantity and reset the product back to 1.
    pub fn take(&mut self, product: &ProductId) -> i64 {
        let quantity = self.get(product);
        self.staged.insert(product.clone(), 1);
        quantity
    }
}

/// A purchasable size of a product, e.g. `250g` at 180.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// Label shown in the size selector.
    pub label: String,
    /// Price for this size.
    pub price: Money,
}

impl SizeVariant {
    /// Create a new size variant.
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }

    /// Cart line name for this size of `product_name`, e.g. `Turmeric (250g)`.
    pub fn line_name(&self, product_name: &str) -> String {
        format!("{} ({})", product_name, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        let pending = PendingQuantities::new();
        assert_eq!(pending.get(&ProductId::new("turmeric")), 1);
    }

    #[test]
    fn test_stage_up_and_down() {
        let mut pending = PendingQuantities::new();
        let id = ProductId::new("turmeric");

        assert_eq!(pending.stage(&id, 1), 2);
        assert_eq!(pending.stage(&id, 1), 3);
        assert_eq!(pending.stage(&id, -1), 2);
    }

    #[test]
    fn test_stage_floors_at_one() {
        let mut pending = PendingQuantities::new();
        let id = ProductId::new("turmeric");

        assert_eq!(pending.stage(&id, -1), 1);
        assert_eq!(pending.stage(&id, -10), 1);
    }

    #[test]
    fn test_take_resets() {
        let mut pending = PendingQuantities::new();
        let id = ProductId::new("chilli");
        pending.stage(&id, 3);

        assert_eq!(pending.take(&id), 4);
        assert_eq!(pending.get(&id), 1);
    }

    #[test]
    fn test_products_are_independent() {
        let mut pending = PendingQuantities::new();
        pending.stage(&ProductId::new("a"), 2);
        assert_eq!(pending.get(&ProductId::new("b")), 1);
    }

    #[test]
    fn test_variant_line_name() {
        let variant = SizeVariant::new("250g", Money::new(180));
        assert_eq!(variant.line_name("Turmeric"), "Turmeric (250g)");
    }
}
