use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Cart, CartItem, ItemError, PolicyError, PricingPolicy, Quote};

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub items: Vec<CartItem>,
    pub quote: Quote,
    pub checked_out_at: DateTime<Utc>,
}

impl Receipt {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// Owns a single shopper's cart for the lifetime of a session.
///
/// The session starts empty, is filled with [`CartSession::add_item`] and
/// ends with [`CartSession::checkout`] or [`CartSession::reset`], both of
/// which leave an empty cart behind.
#[derive(Debug, Default)]
pub struct CartSession {
    cart: Cart,
    policy: PricingPolicy,
}

impl CartSession {
    /// Starts an empty session, rejecting an invalid policy.
    pub fn new(policy: PricingPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            cart: Cart::new(),
            policy,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Adds an item, leaving the cart untouched when validation fails.
    pub fn add_item(&mut self, name: impl Into<String>, price: f64) -> Result<(), ItemError> {
        let item = CartItem::new(name, price)?;
        self.cart = std::mem::take(&mut self.cart).with_item(item);
        Ok(())
    }

    pub fn remove_item(&mut self, name: &str) {
        self.cart = std::mem::take(&mut self.cart).remove_item(name);
    }

    pub fn quote(&self) -> Quote {
        self.policy.quote(&self.cart)
    }

    /// Prices the cart, empties it and returns the receipt.
    pub fn checkout(&mut self) -> Receipt {
        let quote = self.quote();
        let items: Vec<CartItem> = std::mem::take(&mut self.cart).into_iter().collect();
        info!(items = items.len(), total = quote.total, "Checked out cart");
        Receipt {
            items,
            quote,
            checked_out_at: Utc::now(),
        }
    }

    pub fn reset(&mut self) {
        info!(items = self.cart.len(), "Resetting cart");
        self.cart = Cart::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_clears_cart() {
        let mut session = CartSession::default();
        session.add_item("milk", 2000.0).unwrap();
        session.add_item("bread", 1000.0).unwrap();

        let receipt = session.checkout();
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.quote.total, 3300.0);
        assert!(receipt.checked_out_at <= Utc::now());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn invalid_item_keeps_cart() {
        let mut session = CartSession::default();
        session.add_item("milk", 2000.0).unwrap();
        assert!(session.add_item("bread", f64::NAN).is_err());
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn receipt_json_roundtrip() {
        let mut session = CartSession::default();
        session.add_item("milk", 2000.0).unwrap();
        let receipt = session.checkout();
        let parsed = Receipt::from_json(&receipt.to_json().unwrap()).unwrap();
        assert_eq!(parsed, receipt);
    }
}
