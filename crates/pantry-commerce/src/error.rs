//! Commerce error types.

use crate::money::Money;
use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// The first three variants are user-facing checkout rejections; none of
/// them leaves partial effects behind.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// One or more customer fields are blank after trimming.
    #[error("Please fill all details (missing: {})", .0.join(", "))]
    IncompleteCustomerInfo(Vec<&'static str>),

    /// Subtotal is under the minimum order amount.
    #[error("Minimum order {minimum} required (cart subtotal is {subtotal})")]
    BelowMinimumOrder { subtotal: Money, minimum: Money },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persistent storage failed.
    #[error("Cache error: {0}")]
    Cache(#[from] pantry_cache::CacheError),
}

impl CommerceError {
    /// Whether this error is a checkout rejection meant to be shown to the shopper.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CommerceError::EmptyCart
                | CommerceError::IncompleteCustomerInfo(_)
                | CommerceError::BelowMinimumOrder { .. }
        )
    }
}
