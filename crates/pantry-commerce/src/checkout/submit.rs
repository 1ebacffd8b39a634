//! Order submission.

use chrono::{DateTime, Local};
use pantry_cache::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::checkout::{CustomerDetails, MessagingHandoff, MessagingLink, Order, OrderChannel};
use crate::error::CommerceError;
use crate::ids::{OrderId, DEFAULT_ORDER_PREFIX};
use crate::store::CartStore;

/// Default shop name printed at the top of order messages.
pub const DEFAULT_SHOP_NAME: &str = "Vijayalakshmi Foods";

/// Static details about where orders go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettings {
    /// Shop name for the order message.
    pub shop_name: String,
    /// Prefix for generated order identifiers.
    pub id_prefix: String,
    /// Messaging number (international format, digits only).
    pub whatsapp_number: String,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            id_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            whatsapp_number: "919618082853".to_string(),
        }
    }
}

/// Turns a cart into a submitted order.
pub struct Checkout<'a> {
    settings: &'a OrderSettings,
    channel: &'a dyn OrderChannel,
    handoff: &'a dyn MessagingHandoff,
}

impl<'a> Checkout<'a> {
    /// Create a checkout over the given channels.
    pub fn new(
        settings: &'a OrderSettings,
        channel: &'a dyn OrderChannel,
        handoff: &'a dyn MessagingHandoff,
    ) -> Self {
        Self {
            settings,
            channel,
            handoff,
        }
    }

    /// Submit the store's cart for `customer`, timestamped now.
    pub fn submit<S: KeyValueStore>(
        &self,
        store: &mut CartStore<S>,
        customer: &CustomerDetails,
    ) -> Result<Order, CommerceError> {
        self.submit_at(store, customer, Local::now())
    }

    /// Submit the store's cart for `customer`.
    ///
    /// Checks run in order: empty cart, blank customer fields, minimum
    /// order. A failed check leaves everything untouched: no identifier is
    /// generated, no channel is called and the cart is kept. On success the
    /// order goes to the order channel and the messaging handoff, the
    /// customer details are remembered and the cart is cleared.
    pub fn submit_at<S: KeyValueStore>(
        &self,
        store: &mut CartStore<S>,
        customer: &CustomerDetails,
        placed_at: DateTime<Local>,
    ) -> Result<Order, CommerceError> {
        if store.cart().is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let customer = customer.validated()?;

        let totals = store.totals()?;
        let policy = store.policy();
        if !policy.meets_minimum(totals.subtotal) {
            return Err(CommerceError::BelowMinimumOrder {
                subtotal: totals.subtotal,
                minimum: policy.minimum_order,
            });
        }

        let id = OrderId::generate(&self.settings.id_prefix);
        let order = Order::from_cart(id, placed_at, customer, store.cart(), totals)?;

        self.channel.submit(&order.payload());
        let link = MessagingLink::whatsapp(&self.settings.whatsapp_number);
        self.handoff
            .open(&link.for_order(&order, &self.settings.shop_name));

        tracing::info!(
            order_id = %order.id(),
            items = order.item_count(),
            total = %order.total(),
            "order submitted"
        );

        // The order has left; storage trouble from here on must not look
        // like a failed submission.
        if let Err(e) = store.remember_customer(order.customer()) {
            tracing::warn!(error = %e, "failed to remember customer details");
        }
        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "failed to persist cleared cart");
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PricingPolicy;
    use crate::checkout::OrderPayload;
    use crate::money::Money;
    use pantry_cache::{Cache, MemoryStore};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Outbox {
        payloads: RefCell<Vec<OrderPayload>>,
        links: RefCell<Vec<String>>,
    }

    impl OrderChannel for Outbox {
        fn submit(&self, payload: &OrderPayload) {
            self.payloads.borrow_mut().push(payload.clone());
        }
    }

    impl MessagingHandoff for Outbox {
        fn open(&self, url: &str) {
            self.links.borrow_mut().push(url.to_string());
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails::new("Lakshmi", "9848012345", "12 Temple St")
    }

    fn store() -> CartStore<MemoryStore> {
        CartStore::load(Cache::new(MemoryStore::new()), PricingPolicy::default())
    }

    #[test]
    fn test_submit_valid_order() {
        let settings = OrderSettings::default();
        let outbox = Outbox::default();
        let mut store = store();
        store.add_item("Turmeric (250g)", Money::new(180), 2).unwrap();

        let order = Checkout::new(&settings, &outbox, &outbox)
            .submit(&mut store, &customer())
            .unwrap();

        assert!(order.id().as_str().starts_with("VL"));
        assert_eq!(order.total(), Money::new(440));
        assert!(store.cart().is_empty());
        assert_eq!(store.saved_customer(), Some(customer()));

        let payloads = outbox.payloads.borrow();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].order_id, order.id().as_str());

        let links = outbox.links.borrow();
        assert_eq!(links.len(), 1);
        assert!(links[0].starts_with("https://wa.me/919618082853?text=Vijayalakshmi%20Foods"));
        assert!(links[0].contains(order.id().as_str()));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let settings = OrderSettings::default();
        let outbox = Outbox::default();
        let mut store = store();

        let result = Checkout::new(&settings, &outbox, &outbox).submit(&mut store, &customer());

        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert!(outbox.payloads.borrow().is_empty());
        assert!(outbox.links.borrow().is_empty());
    }

    #[test]
    fn test_incomplete_customer_rejected() {
        let settings = OrderSettings::default();
        let outbox = Outbox::default();
        let mut store = store();
        store.add_item("Turmeric (250g)", Money::new(180), 2).unwrap();

        let result = Checkout::new(&settings, &outbox, &outbox)
            .submit(&mut store, &CustomerDetails::new("Lakshmi", " ", "12 Temple St"));

        assert!(matches!(
            result,
            Err(CommerceError::IncompleteCustomerInfo(ref missing)) if missing == &["phone"]
        ));
        assert_eq!(store.cart_count(), 2);
        assert!(outbox.payloads.borrow().is_empty());
        assert!(store.saved_customer().is_none());
    }

    #[test]
    fn test_below_minimum_rejected() {
        let settings = OrderSettings::default();
        let outbox = Outbox::default();
        let mut store = store();
        store.add_item("Sample Sachet", Money::new(25), 2).unwrap();

        let result = Checkout::new(&settings, &outbox, &outbox).submit(&mut store, &customer());

        match result {
            Err(CommerceError::BelowMinimumOrder { subtotal, minimum }) => {
                assert_eq!(subtotal, Money::new(50));
                assert_eq!(minimum, Money::new(99));
            }
            other => panic!("expected BelowMinimumOrder, got {:?}", other),
        }
        assert_eq!(store.cart_count(), 2);
        assert!(outbox.links.borrow().is_empty());
    }

    #[test]
    fn test_empty_cart_checked_before_customer() {
        let settings = OrderSettings::default();
        let outbox = Outbox::default();
        let mut store = store();

        let result = Checkout::new(&settings, &outbox, &outbox)
            .submit(&mut store, &CustomerDetails::default());
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_custom_prefix_and_shop_name() {
        let settings = OrderSettings {
            shop_name: "Corner Spices".to_string(),
            id_prefix: "CS".to_string(),
            whatsapp_number: "10000".to_string(),
        };
        let outbox = Outbox::default();
        let mut store = store();
        store.add_item("Cardamom (50g)", Money::new(150), 1).unwrap();

        let order = Checkout::new(&settings, &outbox, &outbox)
            .submit(&mut store, &customer())
            .unwrap();

        assert!(order.id().as_str().starts_with("CS"));
        assert!(outbox.links.borrow()[0].starts_with("https://wa.me/10000?text=Corner%20Spices"));
    }
}
