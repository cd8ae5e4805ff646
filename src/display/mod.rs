//! Display collaborators the cart pipeline reports to.
//!
//! The core never looks these up itself. Callers compute a [`Quote`] first
//! and then decide whether and where to render it.

use std::io::Write;

use tracing::{debug, warn};

use crate::core::{CartItem, PricingPolicy, Quote};

/// A "buy" button bound to one catalogue item.
pub trait BuyButton {
    /// The item this button would add to the cart.
    fn item(&self) -> &CartItem;
    /// Shows the free-shipping icon next to the button.
    fn show_free_shipping_icon(&mut self);
    /// Hides the free-shipping icon next to the button.
    fn hide_free_shipping_icon(&mut self);
}

/// Sinks for the cart total and tax.
pub trait CartDisplay {
    fn set_cart_total(&mut self, value: f64);
    fn set_tax(&mut self, value: f64);
}

/// Toggles the free-shipping icon of every button against `subtotal` and
/// returns how many icons are shown.
pub fn update_shipping_icons<B: BuyButton>(
    buttons: &mut [B],
    subtotal: f64,
    policy: &PricingPolicy,
) -> usize {
    buttons.iter_mut().fold(0, |shown, button| {
        let price = button.item().price();
        if policy.is_shipping_eligible(price, subtotal) {
            button.show_free_shipping_icon();
            shown + 1
        } else {
            button.hide_free_shipping_icon();
            shown
        }
    })
}

/// Pushes the quote's total and tax to `display`.
pub fn render(quote: &Quote, display: &mut dyn CartDisplay) {
    debug!(total = quote.total, tax = quote.tax, "Rendering quote");
    display.set_cart_total(quote.total);
    display.set_tax(quote.tax);
}

/// Button that only records whether its icon is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryButton {
    item: CartItem,
    icon_visible: bool,
}

impl MemoryButton {
    pub fn new(item: CartItem) -> Self {
        Self {
            item,
            icon_visible: false,
        }
    }

    pub fn icon_visible(&self) -> bool {
        self.icon_visible
    }
}

impl BuyButton for MemoryButton {
    fn item(&self) -> &CartItem {
        &self.item
    }

    fn show_free_shipping_icon(&mut self) {
        self.icon_visible = true;
    }

    fn hide_free_shipping_icon(&mut self) {
        self.icon_visible = false;
    }
}

/// Display that keeps the last values it was given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryDisplay {
    pub cart_total: Option<f64>,
    pub tax: Option<f64>,
}

impl CartDisplay for MemoryDisplay {
    fn set_cart_total(&mut self, value: f64) {
        self.cart_total = Some(value);
    }

    fn set_tax(&mut self, value: f64) {
        self.tax = Some(value);
    }
}

/// Display writing one line per value to a writer such as stdout.
pub struct ConsoleDisplay<W: Write> {
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CartDisplay for ConsoleDisplay<W> {
    fn set_cart_total(&mut self, value: f64) {
        if let Err(e) = writeln!(self.out, "total: {value}") {
            warn!(error = %e, "Failed to write cart total");
        }
    }

    fn set_tax(&mut self, value: f64) {
        if let Err(e) = writeln!(self.out, "tax: {value}") {
            warn!(error = %e, "Failed to write tax");
        }
    }
}
