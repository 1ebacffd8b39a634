//! Cart pricing calculations.
//!
//! Delivery is tiered on the subtotal: an empty cart pays nothing, a cart at
//! or above the free-delivery threshold pays nothing, anything in between
//! pays a flat fee.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal at which delivery becomes free (inclusive).
pub const FREE_DELIVERY_THRESHOLD: Money = Money::new(1299);

/// Flat delivery fee below the threshold.
pub const FLAT_DELIVERY_FEE: Money = Money::new(80);

/// Smallest subtotal accepted at checkout.
pub const MINIMUM_ORDER: Money = Money::new(99);

/// Delivery and minimum-order rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotal at which delivery becomes free.
    #[serde(default = "default_threshold")]
    pub free_delivery_threshold: Money,
    /// Fee charged below the threshold.
    #[serde(default = "default_fee")]
    pub delivery_fee: Money,
    /// Minimum subtotal for checkout.
    #[serde(default = "default_minimum")]
    pub minimum_order: Money,
}

fn default_threshold() -> Money {
    FREE_DELIVERY_THRESHOLD
}

fn default_fee() -> Money {
    FLAT_DELIVERY_FEE
}

fn default_minimum() -> Money {
    MINIMUM_ORDER
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_delivery_threshold: FREE_DELIVERY_THRESHOLD,
            delivery_fee: FLAT_DELIVERY_FEE,
            minimum_order: MINIMUM_ORDER,
        }
    }
}

impl PricingPolicy {
    /// Delivery fee for a subtotal.
    pub fn delivery_fee(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal >= self.free_delivery_threshold {
            Money::zero()
        } else {
            self.delivery_fee
        }
    }

    /// Subtotal, delivery and grand total for a cart.
    pub fn compute_totals(&self, cart: &Cart) -> Result<CartTotals, CommerceError> {
        let subtotal = cart.subtotal()?;
        let delivery = self.delivery_fee(subtotal);
        let total = subtotal
            .try_add(&delivery)
            .ok_or(CommerceError::Overflow)?;
        Ok(CartTotals {
            subtotal,
            delivery,
            total,
        })
    }

    /// Which delivery message applies to a subtotal.
    pub fn delivery_notice(&self, subtotal: Money) -> DeliveryNotice {
        if subtotal.is_zero() {
            DeliveryNotice::Empty
        } else if subtotal >= self.free_delivery_threshold {
            DeliveryNotice::Free
        } else {
            DeliveryNotice::Charged {
                fee: self.delivery_fee,
                remaining: subtotal.saturating_gap_to(self.free_delivery_threshold),
            }
        }
    }

    /// Whether a subtotal meets the minimum order.
    pub fn meets_minimum(&self, subtotal: Money) -> bool {
        subtotal >= self.minimum_order
    }
}

/// Delivery fee under the default policy.
pub fn delivery_fee(subtotal: Money) -> Money {
    PricingPolicy::default().delivery_fee(subtotal)
}

/// Totals under the default policy.
pub fn compute_totals(cart: &Cart) -> Result<CartTotals, CommerceError> {
    PricingPolicy::default().compute_totals(cart)
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Delivery fee.
    pub delivery: Money,
    /// subtotal + delivery.
    pub total: Money,
}

/// Delivery message shown next to the cart. Exactly one applies to any
/// subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryNotice {
    /// Nothing in the cart, nothing charged.
    Empty,
    /// The subtotal qualifies for free delivery.
    Free,
    /// A fee applies; `remaining` more unlocks free delivery.
    Charged { fee: Money, remaining: Money },
}

impl DeliveryNotice {
    /// One-line text for the notice.
    pub fn message(&self) -> String {
        match self {
            DeliveryNotice::Empty => format!("Delivery charge: {}", Money::zero()),
            DeliveryNotice::Free => "Delivery: FREE".to_string(),
            DeliveryNotice::Charged { fee, remaining } => format!(
                "Delivery charge: {} (add {} more for FREE delivery)",
                fee, remaining
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_fee_tiers() {
        assert_eq!(delivery_fee(Money::new(0)), Money::new(0));
        assert_eq!(delivery_fee(Money::new(1)), Money::new(80));
        assert_eq!(delivery_fee(Money::new(1298)), Money::new(80));
        assert_eq!(delivery_fee(Money::new(1299)), Money::new(0));
        assert_eq!(delivery_fee(Money::new(5000)), Money::new(0));
    }

    #[test]
    fn test_totals_below_threshold() {
        let mut cart = Cart::new();
        cart.add_item("Turmeric (250g)", Money::new(180), 2);

        let totals = compute_totals(&cart).unwrap();
        assert_eq!(totals.subtotal, Money::new(360));
        assert_eq!(totals.delivery, Money::new(80));
        assert_eq!(totals.total, Money::new(440));
    }

    #[test]
    fn test_totals_above_threshold() {
        let mut cart = Cart::new();
        cart.add_item("Turmeric (250g)", Money::new(180), 8);

        let totals = compute_totals(&cart).unwrap();
        assert_eq!(totals.subtotal, Money::new(1440));
        assert_eq!(totals.delivery, Money::zero());
        assert_eq!(totals.total, Money::new(1440));
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = compute_totals(&Cart::new()).unwrap();
        assert_eq!(totals, CartTotals::default());
    }

    #[test]
    fn test_totals_consistent() {
        let mut cart = Cart::new();
        for (i, price) in [45, 180, 90, 310, 275].into_iter().enumerate() {
            cart.add_item(format!("item-{}", i), Money::new(price), i as i64 + 1);
            let totals = compute_totals(&cart).unwrap();
            assert_eq!(totals.total, totals.subtotal + totals.delivery);
        }
    }

    #[test]
    fn test_delivery_notice_states() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_notice(Money::zero()), DeliveryNotice::Empty);
        assert_eq!(policy.delivery_notice(Money::new(1299)), DeliveryNotice::Free);
        assert_eq!(
            policy.delivery_notice(Money::new(360)),
            DeliveryNotice::Charged {
                fee: Money::new(80),
                remaining: Money::new(939),
            }
        );
    }

    #[test]
    fn test_delivery_notice_message() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy.delivery_notice(Money::new(1000)).message(),
            "Delivery charge: \u{20b9}80 (add \u{20b9}299 more for FREE delivery)"
        );
        assert_eq!(policy.delivery_notice(Money::new(2000)).message(), "Delivery: FREE");
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_delivery_threshold: Money::new(500),
            delivery_fee: Money::new(40),
            minimum_order: Money::new(150),
        };
        assert_eq!(policy.delivery_fee(Money::new(499)), Money::new(40));
        assert_eq!(policy.delivery_fee(Money::new(500)), Money::zero());
        assert!(!policy.meets_minimum(Money::new(149)));
        assert!(policy.meets_minimum(Money::new(150)));
    }

    #[test]
    fn test_policy_deserializes_partial() {
        let policy: PricingPolicy = serde_json::from_str(r#"{"delivery_fee": 60}"#).unwrap();
        assert_eq!(policy.delivery_fee, Money::new(60));
        assert_eq!(policy.free_delivery_threshold, FREE_DELIVERY_THRESHOLD);
        assert_eq!(policy.minimum_order, MINIMUM_ORDER);
    }
}
