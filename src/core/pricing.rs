use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Cart;

/// Flat tax rate applied when no policy is configured.
pub const DEFAULT_TAX_RATE: f64 = 0.1;
/// Item price plus subtotal needed for free shipping.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: f64 = 20.0;

/// How tax is applied across the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Each item is taxed on its own and `price + tax` is summed.
    #[default]
    PerItem,
    /// Tax is computed once on the subtotal.
    OnSubtotal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    InvalidTaxRate(f64),
    InvalidThreshold(f64),
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyError::InvalidTaxRate(r) => {
                write!(f, "tax rate must be a non-negative number: {r}")
            }
            PolicyError::InvalidThreshold(t) => {
                write!(f, "free shipping threshold must be a non-negative number: {t}")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Rates and thresholds used to price a cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub tax_rate: f64,
    pub free_shipping_threshold: f64,
    pub tax_mode: TaxMode,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            tax_mode: TaxMode::default(),
        }
    }
}

/// Subtotal, tax and total computed for a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl PricingPolicy {
    /// Checks that the rate and threshold are finite and non-negative.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(PolicyError::InvalidTaxRate(self.tax_rate));
        }
        if !self.free_shipping_threshold.is_finite() || self.free_shipping_threshold < 0.0 {
            return Err(PolicyError::InvalidThreshold(self.free_shipping_threshold));
        }
        Ok(())
    }

    pub fn tax(&self, amount: f64) -> f64 {
        amount * self.tax_rate
    }

    pub fn is_shipping_eligible(&self, item_price: f64, subtotal: f64) -> bool {
        item_price + subtotal >= self.free_shipping_threshold
    }

    /// Prices the cart according to [`TaxMode`].
    ///
    /// In per-item mode `total` is the sum of `price + tax(price)` and `tax`
    /// is `total - subtotal`, so `subtotal + tax == total` for rates up to 1.
    pub fn quote(&self, cart: &Cart) -> Quote {
        let subtotal = cart.subtotal();
        let quote = match self.tax_mode {
            TaxMode::PerItem => {
                let total = cart.items().iter().fold(0.0, |total, item| {
                    total + item.price() + self.tax(item.price())
                });
                Quote {
                    subtotal,
                    tax: total - subtotal,
                    total,
                }
            }
            TaxMode::OnSubtotal => {
                let tax = self.tax(subtotal);
                Quote {
                    subtotal,
                    tax,
                    total: subtotal + tax,
                }
            }
        };
        debug!(
            items = cart.len(),
            subtotal = quote.subtotal,
            tax = quote.tax,
            total = quote.total,
            mode = ?self.tax_mode,
            "Priced cart"
        );
        quote
    }
}
