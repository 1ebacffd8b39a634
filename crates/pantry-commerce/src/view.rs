//! Change notification for whatever displays the cart.
//!
//! The store never renders anything itself. After each mutation it hands a
//! [`CartSnapshot`] to its observers; [`CartView`] fans that snapshot out to
//! whichever display targets the current page actually has.

use crate::cart::{Cart, CartTotals, DeliveryNotice, LineItem};

/// Read-only view of the cart after a change.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    /// The cart itself.
    pub cart: &'a Cart,
    /// Sum of quantities, for the badge.
    pub count: i64,
    /// Current totals.
    pub totals: CartTotals,
    /// Delivery message that applies to the subtotal.
    pub notice: DeliveryNotice,
}

/// Receives cart change notifications.
pub trait CartObserver {
    /// The cart changed and was persisted.
    fn cart_changed(&mut self, snapshot: &CartSnapshot<'_>);

    /// A short confirmation for the shopper (e.g., "Added to cart").
    fn notify(&mut self, _message: &str) {}
}

/// Renders the line list and grand total.
pub trait CartListTarget {
    fn render_items(&mut self, items: &[LineItem], totals: &CartTotals);
}

/// Shows the item count badge.
pub trait CountBadgeTarget {
    fn show_count(&mut self, count: i64);
}

/// Shows the delivery message.
pub trait DeliveryNoticeTarget {
    fn show_notice(&mut self, notice: &DeliveryNotice);
}

/// Shows a transient confirmation.
pub trait ToastTarget {
    fn toast(&mut self, message: &str);
}

impl<F: FnMut(&[LineItem], &CartTotals)> CartListTarget for F {
    fn render_items(&mut self, items: &[LineItem], totals: &CartTotals) {
        self(items, totals)
    }
}

impl<F: FnMut(i64)> CountBadgeTarget for F {
    fn show_count(&mut self, count: i64) {
        self(count)
    }
}

impl<F: FnMut(&DeliveryNotice)> DeliveryNoticeTarget for F {
    fn show_notice(&mut self, notice: &DeliveryNotice) {
        self(notice)
    }
}

impl<F: FnMut(&str)> ToastTarget for F {
    fn toast(&mut self, message: &str) {
        self(message)
    }
}

/// A page's worth of cart display targets.
///
/// Any target may be absent (a product page has a badge but no cart list);
/// refreshes for absent targets are skipped.
#[derive(Default)]
pub struct CartView {
    list: Option<Box<dyn CartListTarget>>,
    badge: Option<Box<dyn CountBadgeTarget>>,
    delivery: Option<Box<dyn DeliveryNoticeTarget>>,
    toast: Option<Box<dyn ToastTarget>>,
}

impl CartView {
    /// A view with no targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line list target.
    pub fn with_list(mut self, target: impl CartListTarget + 'static) -> Self {
        self.list = Some(Box::new(target));
        self
    }

    /// Set the count badge target.
    pub fn with_badge(mut self, target: impl CountBadgeTarget + 'static) -> Self {
        self.badge = Some(Box::new(target));
        self
    }

    /// Set the delivery message target.
    pub fn with_delivery(mut self, target: impl DeliveryNoticeTarget + 'static) -> Self {
        self.delivery = Some(Box::new(target));
        self
    }

    /// Set the toast target.
    pub fn with_toast(mut self, target: impl ToastTarget + 'static) -> Self {
        self.toast = Some(Box::new(target));
        self
    }
}

impl CartObserver for CartView {
    fn cart_changed(&mut self, snapshot: &CartSnapshot<'_>) {
        if let Some(badge) = self.badge.as_mut() {
            badge.show_count(snapshot.count);
        }
        // The delivery message lives inside the cart panel.
        let Some(list) = self.list.as_mut() else {
            return;
        };
        list.render_items(snapshot.cart.items(), &snapshot.totals);
        if let Some(delivery) = self.delivery.as_mut() {
            delivery.show_notice(&snapshot.notice);
        }
    }

    fn notify(&mut self, message: &str) {
        if let Some(toast) = self.toast.as_mut() {
            toast.toast(message);
        }
    }
}
