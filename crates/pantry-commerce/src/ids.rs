//! String identifiers for products and orders.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default prefix for generated order identifiers.
pub const DEFAULT_ORDER_PREFIX: &str = "VL";

/// Number of trailing epoch-millisecond digits kept in an order identifier.
const ORDER_CLOCK_DIGITS: u32 = 6;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Key for a product card's staged quantity, e.g. `turmeric`.
    ProductId
);
string_id!(
    /// Order reference shared by the webhook record and the message.
    OrderId
);

impl OrderId {
    /// Generate an order identifier from the current clock and a random suffix.
    ///
    /// Uniqueness is best-effort: two orders in the same millisecond window
    /// collide only if they also draw the same suffix.
    pub fn generate(prefix: &str) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = rand::thread_rng().gen_range(1000..=9999);
        Self::from_parts(prefix, millis, suffix)
    }

    /// Build an identifier as `<prefix><last 6 digits of millis><suffix>`.
    pub fn from_parts(prefix: &str, epoch_millis: i64, suffix: u16) -> Self {
        let clock = epoch_millis.rem_euclid(10_i64.pow(ORDER_CLOCK_DIGITS));
        Self(format!(
            "{}{:0width$}{}",
            prefix,
            clock,
            suffix,
            width = ORDER_CLOCK_DIGITS as usize
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id: ProductId = "chilli".into();
        assert_eq!(id.to_string(), "chilli");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""chilli""#);
    }

    #[test]
    fn test_order_id_from_parts() {
        let id = OrderId::from_parts("VL", 1_718_000_123_456, 4321);
        assert_eq!(id.as_str(), "VL1234564321");
    }

    #[test]
    fn test_order_id_pads_clock_digits() {
        let id = OrderId::from_parts("VL", 1_718_000_000_042, 1000);
        assert_eq!(id.as_str(), "VL0000421000");
    }

    #[test]
    fn test_order_id_generation_shape() {
        let id = OrderId::generate(DEFAULT_ORDER_PREFIX);
        let digits = id.as_str().strip_prefix("VL").unwrap();
        assert_eq!(digits.len(), 10);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let suffix: u16 = digits[6..].parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }
}
