//! Cart, pricing and checkout logic for the Pantry storefront.
//!
//! This crate holds the state-bearing part of a small shop's cart widget:
//!
//! - **Cart**: line items keyed by name, staged quantities, size variants
//! - **Pricing**: tiered delivery fee, totals, minimum order
//! - **Store**: the owned cart with persistence and change notification
//! - **Checkout**: order snapshot, webhook payload, messaging deep-link
//!
//! # Example
//!
//! ```rust
//! use pantry_cache::{Cache, MemoryStore};
//! use pantry_commerce::prelude::*;
//!
//! let mut store = CartStore::load(Cache::new(MemoryStore::new()), PricingPolicy::default());
//! store.add_item("Turmeric (250g)", Money::new(180), 2)?;
//!
//! let totals = store.totals()?;
//! assert_eq!(totals.subtotal, Money::new(360));
//! assert_eq!(totals.delivery, Money::new(80));
//! assert_eq!(totals.total, Money::new(440));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod store;
pub mod view;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        compute_totals, delivery_fee, Cart, CartTotals, DeliveryNotice, LineItem,
        PendingQuantities, PricingPolicy, QuantityChange, SizeVariant,
    };

    // Checkout
    pub use crate::checkout::{
        Checkout, CustomerDetails, MessagingHandoff, MessagingLink, Order, OrderChannel,
        OrderLineItem, OrderPayload, OrderSettings,
    };

    // Store
    pub use crate::store::CartStore;
    pub use crate::view::{CartObserver, CartSnapshot, CartView};
}
