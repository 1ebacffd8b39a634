//! Outbound order channels.
//!
//! Both channels are fire-and-forget: implementations report their own
//! failures (usually by logging) and nothing flows back into cart state.

use crate::checkout::{Order, OrderPayload};

/// Base URL of the messaging deep-link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Receives the order record (e.g., a spreadsheet webhook).
pub trait OrderChannel {
    fn submit(&self, payload: &OrderPayload);
}

/// Opens the messaging conversation for an order.
pub trait MessagingHandoff {
    fn open(&self, url: &str);
}

/// Deep-link to a messaging number with a pre-filled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingLink {
    base_url: String,
    number: String,
}

impl MessagingLink {
    /// Link to `number` (international format, digits only) on WhatsApp.
    pub fn whatsapp(number: impl Into<String>) -> Self {
        Self::new(WHATSAPP_BASE_URL, number)
    }

    /// Link to `number` under an arbitrary base URL.
    pub fn new(base_url: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            number: number.into(),
        }
    }

    /// URL carrying `text`, percent-encoded.
    pub fn url_for(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.number,
            urlencoding::encode(text)
        )
    }

    /// URL carrying the order summary.
    pub fn for_order(&self, order: &Order, shop_name: &str) -> String {
        self.url_for(&order.message(shop_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encoding() {
        let link = MessagingLink::whatsapp("919618082853");
        assert_eq!(
            link.url_for("Order ID: VL1\n\u{2022} Cumin x 2 - Rs.120 & more"),
            "https://wa.me/919618082853?text=Order%20ID%3A%20VL1%0A%E2%80%A2%20Cumin%20x%202%20-%20Rs.120%20%26%20more"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let link = MessagingLink::new("https://example.test/", "100");
        assert_eq!(link.url_for("hi"), "https://example.test/100?text=hi");
    }
}
