//! Seed data embedded at compile time.
//!
//! DESIGN
//! ======
//! Fixtures keep the storefront's mock-data shape (camelCase keys, `Id` as
//! the record id). Products are the one record that is transformed on load:
//! the optional `quantityBreaks` list becomes a `PricingSchedule` and is
//! validated against the base price, so a malformed schedule fails startup
//! instead of failing a quote later.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::ErrorCode;
use crate::pricing::{PricingSchedule, PricingTier, ScheduleError};
use crate::services::cart::CartItem;
use crate::services::marketplace::MarketplaceDesign;
use crate::services::product::Product;
use crate::services::saved_design::SavedDesign;
use crate::services::template::Template;
use crate::state::AppState;
use crate::store::{MemoryStore, RecordId};

const PRODUCTS: &str = include_str!("../fixtures/products.json");
const TEMPLATES: &str = include_str!("../fixtures/templates.json");
const SAVED_DESIGNS: &str = include_str!("../fixtures/saved_designs.json");
const CART: &str = include_str!("../fixtures/cart.json");
const MARKETPLACE: &str = include_str!("../fixtures/marketplace.json");

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("product {product_id}: {source}")]
    Schedule {
        product_id: RecordId,
        #[source]
        source: ScheduleError,
    },
    #[error("product {product_id}: invalid base price {price}")]
    InvalidPrice { product_id: RecordId, price: f64 },
}

impl ErrorCode for FixtureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E_FIXTURE_PARSE",
            Self::Schedule { .. } => "E_PRICING_SCHEDULE",
            Self::InvalidPrice { .. } => "E_INVALID_PRICE",
        }
    }
}

/// Product as it appears in fixture data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductFixture {
    #[serde(rename = "Id")]
    id: RecordId,
    name: String,
    category: String,
    #[serde(default)]
    description: String,
    base_price: f64,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    sizes: Vec<String>,
    mockup_url: String,
    #[serde(default)]
    quantity_breaks: Option<Vec<PricingTier>>,
}

impl ProductFixture {
    fn into_product(self) -> Result<Product, FixtureError> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(FixtureError::InvalidPrice { product_id: self.id, price: self.base_price });
        }
        let pricing = PricingSchedule::from_breaks(self.quantity_breaks);
        pricing
            .resolve(self.base_price)
            .map_err(|source| FixtureError::Schedule { product_id: self.id, source })?;
        Ok(Product {
            id: self.id,
            name: self.name,
            category: self.category,
            description: self.description,
            base_price: self.base_price,
            colors: self.colors,
            sizes: self.sizes,
            mockup_url: self.mockup_url,
            pricing,
        })
    }
}

fn parse<T: DeserializeOwned>(file: &'static str, raw: &str) -> Result<Vec<T>, FixtureError> {
    let records: Vec<T> = serde_json::from_str(raw).map_err(|source| FixtureError::Parse { file, source })?;
    debug!(file, count = records.len(), "fixture parsed");
    Ok(records)
}

/// Parse and validate product fixture JSON.
///
/// # Errors
///
/// Returns `Parse` for malformed JSON and `Schedule` / `InvalidPrice` for a
/// product that cannot be priced.
pub fn load_products(raw: &str) -> Result<Vec<Product>, FixtureError> {
    parse::<ProductFixture>("products.json", raw)?
        .into_iter()
        .map(ProductFixture::into_product)
        .collect()
}

/// Build application state from the embedded fixtures.
///
/// # Errors
///
/// Returns a [`FixtureError`] if any embedded fixture fails to parse or
/// validate.
pub fn seed_state(config: StoreConfig) -> Result<AppState, FixtureError> {
    let products = load_products(PRODUCTS)?;
    let templates: Vec<Template> = parse("templates.json", TEMPLATES)?;
    let saved_designs: Vec<SavedDesign> = parse("saved_designs.json", SAVED_DESIGNS)?;
    let cart: Vec<CartItem> = parse("cart.json", CART)?;
    let marketplace: Vec<MarketplaceDesign> = parse("marketplace.json", MARKETPLACE)?;

    info!(
        products = products.len(),
        templates = templates.len(),
        saved_designs = saved_designs.len(),
        cart = cart.len(),
        marketplace = marketplace.len(),
        "store seeded from fixtures"
    );

    Ok(AppState {
        config,
        products: Arc::new(MemoryStore::seeded(products)),
        templates: Arc::new(MemoryStore::seeded(templates)),
        saved_designs: Arc::new(MemoryStore::seeded(saved_designs)),
        cart: Arc::new(MemoryStore::seeded(cart)),
        marketplace: Arc::new(MemoryStore::seeded(marketplace)),
    })
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
