//! End-to-end cart behaviour over the file-backed store.

use std::cell::RefCell;
use std::collections::HashSet;

use pantry_cache::{Cache, FileStore, KeyValueStore};
use pantry_commerce::prelude::*;
use pantry_commerce::store::CART_KEY;

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

fn open(dir: &std::path::Path) -> CartStore<FileStore> {
    let cache = Cache::new(FileStore::open(dir).unwrap());
    CartStore::load(cache, PricingPolicy::default())
}

fn assert_invariants(cart: &Cart) {
    let names: HashSet<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.len(), cart.unique_item_count(), "duplicate names");
    assert!(cart.items().iter().all(|i| i.quantity >= 1), "non-positive quantity");
    assert_eq!(
        cart.item_count(),
        cart.items().iter().map(|i| i.quantity).sum::<i64>()
    );
}

#[test]
fn mixed_operations_keep_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());

    let names = ["Turmeric (250g)", "Chilli Powder (100g)", "Cumin (100g)", "Pepper (50g)"];
    // Deterministic walk over add / change / remove with mixed signs.
    for step in 0..200_i64 {
        let name = names[(step * 7 % 4) as usize];
        match step % 5 {
            0 | 1 => store.add_item(name, Money::new(50 + step % 4 * 40), step % 3 + 1).unwrap(),
            2 => {
                store.change_quantity(name, (step % 7) - 4).unwrap();
            }
            3 => {
                store.change_quantity(name, 2).unwrap();
            }
            _ => {
                if step % 3 == 0 {
                    store.remove_item(name).unwrap();
                }
            }
        }
        assert_invariants(store.cart());
        let totals = store.totals().unwrap();
        assert_eq!(totals.total, totals.subtotal + totals.delivery);
    }
}

#[test]
fn reload_reproduces_cart_in_a_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open(dir.path());
        store.add_item("Turmeric (250g)", Money::new(180), 2).unwrap();
        store.add_item("Chilli Powder (100g)", Money::new(90), 1).unwrap();
        store.change_quantity("Chilli Powder (100g)", 3).unwrap();
    }

    let store = open(dir.path());
    let items: Vec<(&str, i64, i64)> = store
        .cart()
        .items()
        .iter()
        .map(|i| (i.name.as_str(), i.unit_price.amount(), i.quantity))
        .collect();
    assert_eq!(
        items,
        [("Turmeric (250g)", 180, 2), ("Chilli Powder (100g)", 90, 4)]
    );
}

#[test]
fn corrupt_slot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::open(dir.path())
        .unwrap()
        .set(CART_KEY, b"{\"name\": oops")
        .unwrap();

    let store = open(dir.path());
    assert!(store.cart().is_empty());
}

#[test]
fn checkout_clears_cart_and_remembers_customer() {
    let dir = tempfile::tempdir().unwrap();
    let settings = OrderSettings::default();
    let outbox = Outbox::default();
    let customer = CustomerDetails::new("Lakshmi", "9848012345", "12 Temple St");

    let mut store = open(dir.path());
    store.add_item("Turmeric (250g)", Money::new(180), 8).unwrap();

    let order = Checkout::new(&settings, &outbox, &outbox)
        .submit(&mut store, &customer)
        .unwrap();
    assert_eq!(order.subtotal(), Money::new(1440));
    assert_eq!(order.delivery(), Money::zero());
    assert_eq!(order.total(), Money::new(1440));

    let reopened = open(dir.path());
    assert!(reopened.cart().is_empty());
    assert_eq!(reopened.saved_customer(), Some(customer));
    assert_eq!(outbox.payloads.borrow()[0].total, Money::new(1440));
}

#[test]
fn rejected_checkout_has_no_effects() {
    let dir = tempfile::tempdir().unwrap();
    let settings = OrderSettings::default();
    let outbox = Outbox::default();

    let mut store = open(dir.path());
    store.add_item("Sample Sachet", Money::new(50), 1).unwrap();

    let err = Checkout::new(&settings, &outbox, &outbox)
        .submit(&mut store, &CustomerDetails::new("Ravi", "9000000000", "Hanamkonda"))
        .unwrap_err();
    assert!(err.is_user_facing());
    assert!(matches!(err, CommerceError::BelowMinimumOrder { .. }));

    let reopened = open(dir.path());
    assert_eq!(reopened.cart_count(), 1);
    assert!(reopened.saved_customer().is_none());
    assert!(outbox.payloads.borrow().is_empty());
    assert!(outbox.links.borrow().is_empty());
}
