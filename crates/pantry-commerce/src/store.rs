//! The cart store: cart state, staged quantities, persistence and change
//! notification.

use pantry_cache::{Cache, KeyValueStore};

use crate::cart::{Cart, CartTotals, PendingQuantities, PricingPolicy, QuantityChange, SizeVariant};
use crate::checkout::CustomerDetails;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::view::{CartObserver, CartSnapshot};

/// Storage slot holding the cart.
pub const CART_KEY: &str = "cart";

/// Storage slot holding the last-used customer details.
pub const CUSTOMER_KEY: &str = "customer";

/// Confirmation raised after an add-to-cart.
pub const ADDED_TO_CART: &str = "Added to cart";

/// Owns the cart for one shopper.
///
/// Every mutation writes the whole cart to storage before returning and
/// then notifies the observers. Construct one at startup and pass it to
/// whatever handles shopper events.
pub struct CartStore<S> {
    cache: Cache<S>,
    cart: Cart,
    pending: PendingQuantities,
    policy: PricingPolicy,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from storage.
    ///
    /// A missing or unreadable slot yields an empty cart.
    pub fn load(cache: Cache<S>, policy: PricingPolicy) -> Self {
        let cart = cache.get_or_default::<Cart>(CART_KEY).normalized();
        tracing::debug!(lines = cart.unique_item_count(), "cart loaded");
        Self {
            cache,
            cart,
            pending: PendingQuantities::new(),
            policy,
            observers: Vec::new(),
        }
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Builder form of [`subscribe`](Self::subscribe).
    pub fn with_observer(mut self, observer: impl CartObserver + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    /// Add `quantity` of an item, merging with an existing line of the same name.
    ///
    /// Always persists and refreshes; the "Added to cart" toast is raised
    /// only when the cart grew.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let name = name.into();
        tracing::debug!(%name, %unit_price, quantity, "add item");
        let grew = self.cart.add_item(name, unit_price, quantity);
        self.commit()?;
        if grew {
            self.toast(ADDED_TO_CART);
        }
        Ok(())
    }

    /// Remove an item. Removing an absent item still persists and refreshes.
    ///
    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> Result<bool, CommerceError> {
        let removed = self.cart.remove_item(name);
        tracing::debug!(name, removed, "remove item");
        self.commit()?;
        Ok(removed)
    }

    /// Apply a signed quantity change; a result <= 0 removes the item.
    ///
    /// Absent items are left alone without touching storage.
    pub fn change_quantity(
        &mut self,
        name: &str,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let change = self.cart.change_quantity(name, delta);
        tracing::debug!(name, delta, ?change, "change quantity");
        if change != QuantityChange::Missing {
            self.commit()?;
        }
        Ok(change)
    }

    /// Adjust the staged quantity for a product (floored at 1).
    ///
    /// Returns the staged value to display.
    pub fn stage_pending_quantity(&mut self, product: &ProductId, delta: i64) -> i64 {
        self.pending.stage(product, delta)
    }

    /// Currently staged quantity for a product.
    pub fn pending_quantity(&self, product: &ProductId) -> i64 {
        self.pending.get(product)
    }

    /// Add the staged quantity of a product, then reset its staging to 1.
    ///
    /// Returns the quantity that was added.
    pub fn commit_pending_quantity(
        &mut self,
        product: &ProductId,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Result<i64, CommerceError> {
        let quantity = self.pending.get(product);
        let added = self.add_item(name, unit_price, quantity);
        self.pending.take(product);
        added.map(|()| quantity)
    }

    /// Add the staged quantity of one size of a product, named
    /// `"<product> (<size>)"` and priced at that size.
    pub fn commit_selected_variant(
        &mut self,
        product: &ProductId,
        product_name: &str,
        variant: &SizeVariant,
    ) -> Result<i64, CommerceError> {
        self.commit_pending_quantity(product, variant.line_name(product_name), variant.price)
    }

    /// Sum of all quantities.
    pub fn cart_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.commit()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The pricing rules in effect.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Totals for the current cart.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        self.policy.compute_totals(&self.cart)
    }

    /// Last customer details used at checkout, if any were saved and readable.
    pub fn saved_customer(&self) -> Option<CustomerDetails> {
        self.cache
            .get_or_default::<Option<CustomerDetails>>(CUSTOMER_KEY)
    }

    /// Save customer details for the next checkout.
    pub fn remember_customer(&self, customer: &CustomerDetails) -> Result<(), CommerceError> {
        self.cache.set(CUSTOMER_KEY, customer)?;
        Ok(())
    }

    /// Push the current state to every observer without mutating anything.
    pub fn refresh(&mut self) {
        let totals = match self.totals() {
            Ok(totals) => totals,
            Err(e) => {
                tracing::warn!(error = %e, "skipping cart refresh");
                return;
            }
        };
        let snapshot = CartSnapshot {
            cart: &self.cart,
            count: self.cart.item_count(),
            totals,
            notice: self.policy.delivery_notice(totals.subtotal),
        };
        for observer in &mut self.observers {
            observer.cart_changed(&snapshot);
        }
    }

    fn toast(&mut self, message: &str) {
        for observer in &mut self.observers {
            observer.notify(message);
        }
    }

    /// Persist, then refresh.
    fn commit(&mut self) -> Result<(), CommerceError> {
        let saved = self.cache.set(CART_KEY, &self.cart);
        self.refresh();
        saved.map_err(|e| {
            tracing::warn!(error = %e, "failed to persist cart");
            e.into()
        })
    }
}
