//! Checkout module.
//!
//! Contains customer details, the order snapshot, the outbound channels and
//! the submission flow that ties them to the cart store.

mod customer;
mod handoff;
mod order;
mod submit;

pub use customer::CustomerDetails;
pub use handoff::{MessagingHandoff, MessagingLink, OrderChannel, WHATSAPP_BASE_URL};
pub use order::{Order, OrderLineItem, OrderPayload};
pub use submit::{Checkout, OrderSettings, DEFAULT_SHOP_NAME};
