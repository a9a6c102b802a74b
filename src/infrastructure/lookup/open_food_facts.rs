//! Open Food Facts product lookup
//!
//! Adapter for the ProductLookup port against the Open Food Facts v2
//! product endpoint. Failures here never reach the inventory store - a
//! lookup result only pre-fills a draft at the CLI boundary.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::ports::{LookupError, Product, ProductLookup};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// HTTP client for the Open Food Facts product database
pub struct OpenFoodFactsClient {
    agent: ureq::Agent,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builder: point the client at a different endpoint (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ProductLookup for OpenFoodFactsClient {
    fn lookup(&self, barcode: &str) -> Result<Option<Product>, LookupError> {
        let url = format!("{}/api/v2/product/{}.json", self.base_url, barcode);
        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            // The API answers 404 for barcodes it has never seen.
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(err) => return Err(LookupError::Transport(err.to_string())),
        };
        let body: ProductResponse = response
            .into_json()
            .map_err(|err| LookupError::Malformed(err.to_string()))?;
        Ok(body.into_product())
    }
}

/// Wire shape of the v2 product endpoint (only the fields we read)
#[derive(Debug, Deserialize)]
struct ProductResponse {
    status: i64,
    #[serde(default)]
    product: Option<ProductFields>,
}

#[derive(Debug, Deserialize)]
struct ProductFields {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
}

impl ProductResponse {
    fn into_product(self) -> Option<Product> {
        if self.status != 1 {
            return None;
        }
        let fields = self.product?;
        Some(Product {
            name: fields.product_name.filter(|name| !name.is_empty()),
            brand: fields.brands.filter(|brand| !brand.is_empty()),
        })
    }
}
