//! Order types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartTotals};
use crate::checkout::CustomerDetails;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;

/// Timestamp format used in the webhook payload.
const PAYLOAD_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Currency prefix used in the plain-text order message.
const MESSAGE_CURRENCY: &str = "Rs.";

/// A submitted order.
///
/// Built once at checkout and never modified afterwards, so every field is
/// read through an accessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    id: OrderId,
    placed_at: DateTime<Local>,
    customer: CustomerDetails,
    line_items: Vec<OrderLineItem>,
    subtotal: Money,
    delivery: Money,
    total: Money,
}

impl Order {
    /// Snapshot a cart into an order.
    pub fn from_cart(
        id: OrderId,
        placed_at: DateTime<Local>,
        customer: CustomerDetails,
        cart: &Cart,
        totals: CartTotals,
    ) -> Result<Self, CommerceError> {
        let line_items = cart
            .items()
            .iter()
            .map(|item| {
                Ok(OrderLineItem {
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(Self {
            id,
            placed_at,
            customer,
            line_items,
            subtotal: totals.subtotal,
            delivery: totals.delivery,
            total: totals.total,
        })
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn placed_at(&self) -> DateTime<Local> {
        self.placed_at
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn delivery(&self) -> Money {
        self.delivery
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.line_items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Flat record sent to the order-intake webhook.
    pub fn payload(&self) -> OrderPayload {
        let items = self
            .line_items
            .iter()
            .map(|i| format!("{} x{} ({})", i.name, i.quantity, i.line_total))
            .collect::<Vec<_>>()
            .join(", ");

        OrderPayload {
            order_id: self.id.to_string(),
            date: self.placed_at.format(PAYLOAD_DATE_FORMAT).to_string(),
            name: self.customer.name.clone(),
            phone: self.customer.phone.clone(),
            address: self.customer.address.clone(),
            items,
            subtotal: self.subtotal,
            delivery: self.delivery,
            total: self.total,
        }
    }

    /// Human-readable order summary for the messaging handoff.
    pub fn message(&self, shop_name: &str) -> String {
        let mut message = format!("{}\n\n", shop_name);
        message.push_str(&format!("Order ID: {}\n\n", self.id));

        for item in &self.line_items {
            message.push_str(&format!(
                "\u{2022} {} x {} - {}\n",
                item.name,
                item.quantity,
                item.line_total.display_with(MESSAGE_CURRENCY)
            ));
        }

        message.push_str(&format!(
            "\nDelivery: {}",
            self.delivery.display_with(MESSAGE_CURRENCY)
        ));
        message.push_str(&format!(
            "\nTotal: {}\n\n",
            self.total.display_with(MESSAGE_CURRENCY)
        ));
        message.push_str(&format!(
            "Name: {}\nPhone: {}\nAddress: {}\n\n",
            self.customer.name, self.customer.phone, self.customer.address
        ));
        message.push_str("Please confirm my order.");
        message
    }
}

/// A line item in an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineItem {
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    pub unit_price: Money,
    /// Quantity ordered.
    pub quantity: i64,
    /// unit_price * quantity.
    pub line_total: Money,
}

/// Webhook body for the order-intake sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderPayload {
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub date: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Items as `"<name> x<qty> (<line total>)"`, comma separated.
    pub items: String,
    pub subtotal: Money,
    pub delivery: Money,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::compute_totals;
    use chrono::TimeZone;

    fn sample_order() -> Order {
        let mut cart = Cart::new();
        cart.add_item("Turmeric (250g)", Money::new(180), 2);
        cart.add_item("Chilli Powder (100g)", Money::new(90), 1);
        let totals = compute_totals(&cart).unwrap();

        Order::from_cart(
            OrderId::new("VL1234564321"),
            Local.with_ymd_and_hms(2024, 6, 10, 14, 5, 9).unwrap(),
            CustomerDetails::new("Lakshmi", "9848012345", "12 Temple St, Warangal"),
            &cart,
            totals,
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_totals() {
        let order = sample_order();
        assert_eq!(order.subtotal(), Money::new(450));
        assert_eq!(order.delivery(), Money::new(80));
        assert_eq!(order.total(), Money::new(530));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.line_items()[0].line_total, Money::new(360));
    }

    #[test]
    fn test_payload() {
        let payload = sample_order().payload();
        assert_eq!(payload.order_id, "VL1234564321");
        assert_eq!(payload.date, "10/06/2024, 14:05:09");
        assert_eq!(
            payload.items,
            "Turmeric (250g) x2 (\u{20b9}360), Chilli Powder (100g) x1 (\u{20b9}90)"
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["orderID"], "VL1234564321");
        assert_eq!(json["total"], 530);
    }

    #[test]
    fn test_message() {
        let message = sample_order().message("Vijayalakshmi Foods");
        let expected = "Vijayalakshmi Foods\n\n\
            Order ID: VL1234564321\n\n\
            \u{2022} Turmeric (250g) x 2 - Rs.360\n\
            \u{2022} Chilli Powder (100g) x 1 - Rs.90\n\
            \nDelivery: Rs.80\
            \nTotal: Rs.530\n\n\
            Name: Lakshmi\nPhone: 9848012345\nAddress: 12 Temple St, Warangal\n\n\
            Please confirm my order.";
        assert_eq!(message, expected);
    }

    #[test]
    fn test_item_count_saturates() {
        let mut cart = Cart::new();
        cart.add_item("Sample A", Money::zero(), i64::MAX);
        cart.add_item("Sample B", Money::zero(), 3);
        let totals = compute_totals(&cart).unwrap();

        let order = Order::from_cart(
            OrderId::new("VL0000011000"),
            Local.with_ymd_and_hms(2024, 6, 10, 14, 5, 9).unwrap(),
            CustomerDetails::new("Lakshmi", "9848012345", "12 Temple St"),
            &cart,
            totals,
        )
        .unwrap();
        assert_eq!(order.item_count(), i64::MAX);
    }
}
