use std::path::PathBuf;

use cart_total::cli::{run_demo, run_quote};
use cart_total::config::{Config, load_config};
use cart_total::core::{Cart, CartItem};
use cart_total::import;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart", about = "Compute shopping cart totals")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart and report free shipping per item
    Quote {
        /// Item as name=price, may be repeated
        #[arg(long = "item")]
        items: Vec<CartItem>,
        /// CSV or JSON file with name and price columns
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price the sample milk and bread cart
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let policy = cfg.pricing;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Quote { items, file, json } => {
            let cart = match &file {
                Some(path) => import::parse_any(path)?,
                None => Cart::new(),
            };
            let cart = items.into_iter().fold(cart, Cart::with_item);
            run_quote(&cart, &policy, json, &mut stdout)?;
        }
        Commands::Demo => {
            run_demo(&policy, &mut stdout)?;
        }
    }

    Ok(())
}
