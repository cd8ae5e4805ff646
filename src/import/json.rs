use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{CartImporter, ImportError};
use crate::core::{Cart, CartItem};

#[derive(Deserialize)]
struct JsonRow {
    name: String,
    price: f64,
}

/// Reads an array of `{ "name", "price" }` objects.
pub struct JsonImporter;

impl JsonImporter {
    fn parse_internal(path: &Path) -> Result<Cart, ImportError> {
        let content = std::fs::read_to_string(path)?;
        let cart = Self::parse_str(&content)?;
        info!(path = %path.display(), items = cart.len(), "Imported JSON cart");
        Ok(cart)
    }

    pub fn parse_str(input: &str) -> Result<Cart, ImportError> {
        let rows: Vec<JsonRow> =
            serde_json::from_str(input).map_err(|e| ImportError::Parse(e.to_string()))?;
        rows.into_iter()
            .map(|row| CartItem::new(row.name, row.price).map_err(ImportError::from))
            .collect()
    }
}

impl CartImporter for JsonImporter {
    fn parse(path: &Path) -> Result<Cart, ImportError> {
        Self::parse_internal(path)
    }
}

pub fn parse(path: &Path) -> Result<Cart, ImportError> {
    JsonImporter::parse(path)
}

pub fn parse_str(input: &str) -> Result<Cart, ImportError> {
    JsonImporter::parse_str(input)
}
