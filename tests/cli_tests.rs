use cart_total::cli::{run_demo, run_quote};
use cart_total::config::Config;
use cart_total::core::{Cart, PricingPolicy};

fn groceries() -> Cart {
    Cart::new()
        .add_item("milk", 2000.0)
        .unwrap()
        .add_item("bread", 1000.0)
        .unwrap()
}

#[test]
fn demo_uses_default_rate() {
    let mut out = Vec::new();
    let quote = run_demo(&PricingPolicy::default(), &mut out).unwrap();
    assert_eq!(quote.total, 3300.0);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "cart:\n  milk=2000\n  bread=1000\ntotal: 3300\n");
}

#[test]
fn demo_honours_configured_rate() {
    let cfg = Config::from_toml(
        r#"
[pricing]
tax_rate = 0.2
tax_mode = "on_subtotal"
"#,
    )
    .unwrap();
    let mut out = Vec::new();
    let quote = run_demo(&cfg.pricing, &mut out).unwrap();
    assert_eq!(quote.tax, 600.0);
    assert_eq!(quote.total, 3600.0);
    assert!(String::from_utf8(out).unwrap().ends_with("total: 3600\n"));
}

#[test]
fn quote_prints_flags_and_totals() {
    let mut out = Vec::new();
    run_quote(&groceries(), &PricingPolicy::default(), false, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "milk | 2000 | free shipping: yes\n\
         bread | 1000 | free shipping: yes\n\
         subtotal: 3000\n\
         total: 3300\n\
         tax: 300\n"
    );
}

#[test]
fn quote_json_output() {
    let policy = PricingPolicy {
        free_shipping_threshold: 4500.0,
        ..PricingPolicy::default()
    };
    let mut out = Vec::new();
    run_quote(&groceries(), &policy, true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["quote"]["total"], 3300.0);
    assert_eq!(value["free_shipping"], serde_json::json!([true, false]));
    assert_eq!(value["items"][1]["name"], "bread");
}
