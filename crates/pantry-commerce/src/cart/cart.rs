//! Cart and line item types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Items keep insertion order, which is also display order. Names are unique
/// and every quantity is at least 1. The persisted form is the bare item
/// array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw items, restoring the cart invariants.
    ///
    /// Items with a non-positive quantity are dropped and repeated names are
    /// merged into the first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add_item(item.name, item.unit_price, item.quantity);
        }
        cart
    }

    /// Return a copy of this cart with the invariants restored.
    pub fn normalized(self) -> Self {
        Self::from_items(self.items)
    }

    /// Add `quantity` of an item.
    ///
    /// An existing item with the same name has its quantity changed by
    /// `quantity` (the stored unit price is kept); otherwise a new line is
    /// appended. A non-positive quantity for an absent item adds nothing.
    ///
    /// Returns whether the cart grew.
    pub fn add_item(&mut self, name: impl Into<String>, unit_price: Money, quantity: i64) -> bool {
        let name = name.into();
        if self.get_item(&name).is_some() {
            let grew = quantity > 0;
            self.change_quantity(&name, quantity);
            return grew;
        }
        if quantity < 1 {
            return false;
        }
        self.items.push(LineItem::new(name, unit_price, quantity));
        true
    }

    /// Remove an item by name.
    ///
    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() < len_before
    }

    /// Apply a signed quantity change to an item.
    ///
    /// If the resulting quantity is <= 0, removes the item.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> QuantityChange {
        let Some(item) = self.items.iter_mut().find(|i| i.name == name) else {
            return QuantityChange::Missing;
        };

        let quantity = item.quantity.saturating_add(delta);
        if quantity <= 0 {
            self.remove_item(name);
            return QuantityChange::Removed;
        }

        item.quantity = quantity;
        QuantityChange::Updated(quantity)
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by name.
    pub fn get_item(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.try_add(&item.line_total()?)
                .ok_or(CommerceError::Overflow)
        })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No item with that name.
    Missing,
    /// The item's quantity reached zero and it was removed.
    Removed,
    /// The item now has this quantity.
    Updated(i64),
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product name, unique within the cart.
    pub name: String,
    /// Unit price.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Quantity.
    #[serde(rename = "qty")]
    pub quantity: i64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
