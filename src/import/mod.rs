//! Loading cart contents from files.

use std::path::Path;

use crate::core::{Cart, ItemError};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Parse(String),
    Item(ItemError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "io error: {e}"),
            ImportError::Parse(e) => write!(f, "parse error: {e}"),
            ImportError::Item(e) => write!(f, "item error: {e}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(e) => Some(e),
            ImportError::Item(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e)
    }
}

impl From<ItemError> for ImportError {
    fn from(e: ItemError) -> Self {
        ImportError::Item(e)
    }
}

pub trait CartImporter {
    fn parse(path: &Path) -> Result<Cart, ImportError>;
}

/// Picks an importer from the file extension, defaulting to CSV.
pub fn parse_any(path: &Path) -> Result<Cart, ImportError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => self::json::parse(path),
        _ => self::csv::parse(path),
    }
}

pub mod csv;
pub mod json;
