//! Shopping cart module.
//!
//! Contains types for cart, line items, pending quantities and pricing.

mod cart;
mod pending;
pub mod pricing;

pub use cart::{Cart, LineItem, QuantityChange};
pub use pending::{PendingQuantities, SizeVariant};
pub use pricing::{compute_totals, delivery_fee, CartTotals, DeliveryNotice, PricingPolicy};
