//! ProductLookup port - barcode to product info
//!
//! The core consumes this service, never implements it. A lookup result only
//! re-enters the inventory store as a pre-filled draft, so lookup failures
//! stay at the caller's boundary.

use thiserror::Error;

/// What a barcode resolves to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Product {
    pub name: Option<String>,
    pub brand: Option<String>,
}

/// Lookup failures
#[derive(Debug, Error)]
pub enum LookupError {
    /// Could not reach the product database
    #[error("lookup transport failure: {0}")]
    Transport(String),

    /// The database answered with something unparseable
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// Abstract barcode lookup service
pub trait ProductLookup {
    /// Resolve a barcode. `Ok(None)` means the database has no such product.
    fn lookup(&self, barcode: &str) -> Result<Option<Product>, LookupError>;
}
