use std::path::Path;

use csv::Reader;
use serde::Deserialize;
use tracing::info;

use super::{CartImporter, ImportError};
use crate::core::{Cart, CartItem};

#[derive(Deserialize)]
struct CsvRow {
    name: String,
    price: f64,
}

/// Reads `name,price` rows with a header line.
pub struct CsvImporter;

impl CsvImporter {
    fn parse_internal(path: &Path) -> Result<Cart, ImportError> {
        let file = std::fs::File::open(path)?;
        let mut rdr = Reader::from_reader(file);
        let mut cart = Cart::new();
        for result in rdr.deserialize() {
            let row: CsvRow = result.map_err(|e| ImportError::Parse(e.to_string()))?;
            cart = cart.with_item(CartItem::new(row.name, row.price)?);
        }
        info!(path = %path.display(), items = cart.len(), "Imported CSV cart");
        Ok(cart)
    }
}

impl CartImporter for CsvImporter {
    fn parse(path: &Path) -> Result<Cart, ImportError> {
        Self::parse_internal(path)
    }
}

pub fn parse(path: &Path) -> Result<Cart, ImportError> {
    CsvImporter::parse(path)
}
