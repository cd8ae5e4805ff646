//! Bodies of the `cart` subcommands, writing to any output.

use std::io::Write;

use serde::Serialize;

use crate::core::{Cart, CartItem, PricingPolicy, Quote, add_item};
use crate::display::{self, BuyButton, ConsoleDisplay, MemoryButton};

#[derive(Serialize)]
struct QuoteOutput<'a> {
    items: &'a [CartItem],
    quote: Quote,
    free_shipping: Vec<bool>,
}

/// Prices `cart` and prints each item's free-shipping flag followed by the
/// subtotal, total and tax, or the same data as JSON.
pub fn run_quote<W: Write>(
    cart: &Cart,
    policy: &PricingPolicy,
    json: bool,
    out: &mut W,
) -> Result<Quote, Box<dyn std::error::Error>> {
    let quote = policy.quote(cart);

    let mut buttons: Vec<MemoryButton> =
        cart.items().iter().cloned().map(MemoryButton::new).collect();
    display::update_shipping_icons(&mut buttons, quote.subtotal, policy);

    if json {
        let output = QuoteOutput {
            items: cart.items(),
            quote,
            free_shipping: buttons.iter().map(MemoryButton::icon_visible).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        for button in &buttons {
            let flag = if button.icon_visible() { "yes" } else { "no" };
            writeln!(
                out,
                "{} | {} | free shipping: {flag}",
                button.item().name(),
                button.item().price()
            )?;
        }
        writeln!(out, "subtotal: {}", quote.subtotal)?;
        display::render(&quote, &mut ConsoleDisplay::new(&mut *out));
    }
    Ok(quote)
}

/// Prices the sample milk and bread cart under `policy`.
pub fn run_demo<W: Write>(
    policy: &PricingPolicy,
    out: &mut W,
) -> Result<Quote, Box<dyn std::error::Error>> {
    let cart = add_item(Cart::new(), "milk", 2000.0)?;
    let cart = add_item(cart, "bread", 1000.0)?;
    let quote = policy.quote(&cart);

    writeln!(out, "cart:")?;
    for item in cart.items() {
        writeln!(out, "  {item}")?;
    }
    writeln!(out, "total: {}", quote.total)?;
    Ok(quote)
}
