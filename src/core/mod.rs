//! Core cart logic: items, the cart value and the pure cart operations.

pub mod pricing;
pub mod session;

pub use pricing::{
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE, PolicyError, PricingPolicy, Quote, TaxMode,
};
pub use session::{CartSession, Receipt};

use serde::{Deserialize, Deserializer, Serialize, de::Error as DeError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Errors that can occur when creating a [`CartItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemError {
    /// The price is below zero.
    NegativePrice(f64),
    /// The price is NaN or infinite.
    NonFinitePrice,
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::NegativePrice(price) => write!(f, "price must not be negative: {price}"),
            ItemError::NonFinitePrice => write!(f, "price must be a finite number"),
        }
    }
}

impl std::error::Error for ItemError {}

/// Errors returned when parsing a `name=price` item description.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseItemError {
    MissingSeparator(String),
    InvalidPrice(String),
    Item(ItemError),
}

impl fmt::Display for ParseItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseItemError::MissingSeparator(s) => write!(f, "expected name=price, got: {s}"),
            ParseItemError::InvalidPrice(p) => write!(f, "invalid price: {p}"),
            ParseItemError::Item(e) => write!(f, "invalid item: {e}"),
        }
    }
}

impl std::error::Error for ParseItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseItemError::Item(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ItemError> for ParseItemError {
    fn from(e: ItemError) -> Self {
        ParseItemError::Item(e)
    }
}

/// A single product placed in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    name: String,
    price: f64,
}

impl CartItem {
    /// Creates a new item after validating the price.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ItemError> {
        if !price.is_finite() {
            return Err(ItemError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(ItemError::NegativePrice(price));
        }
        Ok(Self {
            name: name.into(),
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Deserialize)]
struct RawItem {
    name: String,
    price: f64,
}

impl<'de> Deserialize<'de> for CartItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawItem::deserialize(deserializer)?;
        CartItem::new(raw.name, raw.price).map_err(DeError::custom)
    }
}

impl FromStr for CartItem {
    type Err = ParseItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, price) = s
            .rsplit_once('=')
            .ok_or_else(|| ParseItemError::MissingSeparator(s.into()))?;
        let price: f64 = price
            .trim()
            .parse()
            .map_err(|_| ParseItemError::InvalidPrice(price.into()))?;
        Ok(CartItem::new(name.trim(), price)?)
    }
}

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.price)
    }
}

/// Ordered collection of items awaiting checkout.
///
/// The cart is passed by value: operations that change it consume the cart
/// and hand back the updated one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a new item.
    pub fn add_item(self, name: impl Into<String>, price: f64) -> Result<Self, ItemError> {
        let item = CartItem::new(name, price)?;
        Ok(self.with_item(item))
    }

    /// Appends an already validated item.
    pub fn with_item(mut self, item: CartItem) -> Self {
        debug!(name = item.name(), price = item.price(), "Adding item to cart");
        self.items.push(item);
        self
    }

    /// Returns the first item with the given name.
    pub fn get_item_by_name(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Removes the first item with the given name. Unknown names leave the
    /// cart unchanged.
    pub fn remove_item(mut self, name: &str) -> Self {
        if let Some(index) = self.items.iter().position(|item| item.name == name) {
            debug!(name, index, "Removing item from cart");
            self.items.remove(index);
        }
        self
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item prices.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().fold(0.0, |total, item| total + item.price)
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Cart {
    type Item = CartItem;
    type IntoIter = std::vec::IntoIter<CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Appends an item to `cart` and returns the updated cart.
pub fn add_item(cart: Cart, name: impl Into<String>, price: f64) -> Result<Cart, ItemError> {
    cart.add_item(name, price)
}

pub fn compute_subtotal(cart: &Cart) -> f64 {
    cart.subtotal()
}

/// Flat tax at [`DEFAULT_TAX_RATE`].
pub fn compute_tax(subtotal: f64) -> f64 {
    PricingPolicy::default().tax(subtotal)
}

/// Sums `price + tax(price)` over every item.
pub fn compute_total_with_tax(cart: &Cart) -> f64 {
    cart.items
        .iter()
        .fold(0.0, |total, item| total + item.price + compute_tax(item.price))
}

/// True when `item_price + subtotal` reaches [`DEFAULT_FREE_SHIPPING_THRESHOLD`].
pub fn is_shipping_eligible(item_price: f64, subtotal: f64) -> bool {
    PricingPolicy::default().is_shipping_eligible(item_price, subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_iterate() {
        let cart = Cart::new()
            .add_item("milk", 2000.0)
            .unwrap()
            .add_item("bread", 1000.0)
            .unwrap();

        let names: Vec<_> = cart.items().iter().map(CartItem::name).collect();
        assert_eq!(names, vec!["milk", "bread"]);
        assert_eq!(cart.subtotal(), 3000.0);
    }

    #[test]
    fn rejects_invalid_prices() {
        assert_eq!(
            CartItem::new("milk", -1.0).unwrap_err(),
            ItemError::NegativePrice(-1.0)
        );
        assert_eq!(
            CartItem::new("milk", f64::NAN).unwrap_err(),
            ItemError::NonFinitePrice
        );
        assert_eq!(
            CartItem::new("milk", f64::INFINITY).unwrap_err(),
            ItemError::NonFinitePrice
        );
    }

    #[test]
    fn failed_add_leaves_no_trace() {
        let cart = Cart::new().add_item("milk", 2000.0).unwrap();
        let err = cart.clone().add_item("bread", -5.0).unwrap_err();
        assert!(matches!(err, ItemError::NegativePrice(_)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_only_first_match() {
        let cart = Cart::new()
            .add_item("milk", 1.0)
            .unwrap()
            .add_item("milk", 2.0)
            .unwrap()
            .remove_item("milk");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get_item_by_name("milk").unwrap().price(), 2.0);
    }

    #[test]
    fn parse_name_price() {
        let item: CartItem = "oat milk = 3.5".parse().unwrap();
        assert_eq!(item.name(), "oat milk");
        assert_eq!(item.price(), 3.5);

        assert!(matches!(
            "milk".parse::<CartItem>(),
            Err(ParseItemError::MissingSeparator(_))
        ));
        assert!(matches!(
            "milk=abc".parse::<CartItem>(),
            Err(ParseItemError::InvalidPrice(_))
        ));
        assert!(matches!(
            "milk=-2".parse::<CartItem>(),
            Err(ParseItemError::Item(ItemError::NegativePrice(_)))
        ));
    }

    #[test]
    fn deserialize_validates_price() {
        let ok: CartItem = serde_json::from_str(r#"{"name":"milk","price":2000}"#).unwrap();
        assert_eq!(ok.price(), 2000.0);
        let bad: Result<CartItem, _> = serde_json::from_str(r#"{"name":"milk","price":-1}"#);
        assert!(bad.is_err());
    }
}
