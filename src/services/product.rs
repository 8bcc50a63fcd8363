//! Product service: catalog CRUD, browsing filters, and bulk quotes.
//!
//! DESIGN
//! ======
//! A product's pricing schedule is validated whenever it enters the store
//! (fixture load, create, update), so `bulk_pricing` can rely on tier
//! selection being total. A product that somehow fails resolution at quote
//! time is reported as a schedule error, never priced silently.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ErrorCode;
use crate::pricing::{self, PriceSummary, PricingSchedule, PricingTier, ScheduleError};
use crate::state::AppState;
use crate::store::{Record, RecordId, StoreError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub base_price: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub mockup_url: String,
    pub pricing: PricingSchedule,
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Product {
    /// Product type shown in the filter sidebar: the first word of the name.
    #[must_use]
    pub fn product_type(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }

    /// Validated tiers for this product's base price.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] for a malformed custom schedule.
    pub fn tiers(&self) -> Result<Vec<PricingTier>, ScheduleError> {
        self.pricing.resolve(self.base_price)
    }
}

/// Sparse product edit. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub mockup_url: Option<String>,
    pub pricing: Option<PricingSchedule>,
}

/// Catalog browsing filter. Empty facets match everything; values within a
/// facet are alternatives, facets combine.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: String,
    /// A category, or `None` / `"all"` for every category.
    pub category: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    /// Product types (first word of the name).
    pub types: Vec<String>,
}

pub const ALL_CATEGORIES: &str = "all";

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty() || product.name.to_lowercase().contains(&search);
        let matches_category = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(c) => product.category == c,
        };
        let matches_colors = self.colors.is_empty() || self.colors.iter().any(|c| product.colors.contains(c));
        let matches_sizes = self.sizes.is_empty() || self.sizes.iter().any(|s| product.sizes.contains(s));
        let matches_types = self.types.is_empty() || self.types.iter().any(|t| t == product.product_type());
        matches_search && matches_category && matches_colors && matches_sizes && matches_types
    }

    /// Number of selected facet values (search and category excluded).
    #[must_use]
    pub fn active_facets(&self) -> usize {
        self.colors.len() + self.sizes.len() + self.types.len()
    }
}

/// Distinct facet values across the catalog, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductFacets {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub types: Vec<String>,
}

/// Bulk pricing for one product at one quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkQuote {
    pub product: Product,
    pub tiers: Vec<PricingTier>,
    pub summary: PriceSummary,
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid pricing schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("invalid base price: {0}")]
    InvalidPrice(f64),
    #[error("no pricing tier for quantity {quantity} on product {product_id}")]
    NoTier { product_id: RecordId, quantity: u32 },
}

impl ErrorCode for ProductError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Schedule(_) => "E_PRICING_SCHEDULE",
            Self::InvalidPrice(_) => "E_INVALID_PRICE",
            Self::NoTier { .. } => "E_NO_TIER",
        }
    }
}

fn check_product(product: &Product) -> Result<(), ProductError> {
    if !product.base_price.is_finite() || product.base_price < 0.0 {
        return Err(ProductError::InvalidPrice(product.base_price));
    }
    product.tiers()?;
    Ok(())
}

// =============================================================================
// CRUD
// =============================================================================

pub async fn list_products(state: &AppState) -> Vec<Product> {
    state.simulate_latency().await;
    state.products.list().await
}

/// # Errors
///
/// Returns `Store(NotFound)` if no product has this id.
pub async fn get_product(state: &AppState, id: RecordId) -> Result<Product, ProductError> {
    state.simulate_latency().await;
    Ok(state.products.get(id).await?)
}

/// Add a product to the catalog under a fresh id.
///
/// # Errors
///
/// Returns `InvalidPrice` or `Schedule` if the product cannot be priced.
pub async fn create_product(state: &AppState, product: Product) -> Result<Product, ProductError> {
    check_product(&product)?;
    state.simulate_latency().await;
    let product = state.products.insert(product).await;
    info!(product_id = product.id, name = %product.name, "product created");
    Ok(product)
}

/// Apply a sparse update.
///
/// # Errors
///
/// Returns `Store(NotFound)` for an unknown id; `InvalidPrice` or `Schedule`
/// if the result cannot be priced (the stored product is left unchanged).
pub async fn update_product(state: &AppState, id: RecordId, update: ProductUpdate) -> Result<Product, ProductError> {
    state.simulate_latency().await;
    let mut product = state.products.get(id).await?;
    if let Some(name) = update.name {
        product.name = name;
    }
    if let Some(category) = update.category {
        product.category = category;
    }
    if let Some(description) = update.description {
        product.description = description;
    }
    if let Some(base_price) = update.base_price {
        product.base_price = base_price;
    }
    if let Some(colors) = update.colors {
        product.colors = colors;
    }
    if let Some(sizes) = update.sizes {
        product.sizes = sizes;
    }
    if let Some(mockup_url) = update.mockup_url {
        product.mockup_url = mockup_url;
    }
    if let Some(pricing) = update.pricing {
        product.pricing = pricing;
    }
    check_product(&product)?;
    let product = state.products.update(product).await?;
    debug!(product_id = id, "product updated");
    Ok(product)
}

/// # Errors
///
/// Returns `Store(NotFound)` if no product has this id.
pub async fn delete_product(state: &AppState, id: RecordId) -> Result<Product, ProductError> {
    state.simulate_latency().await;
    let product = state.products.remove(id).await?;
    info!(product_id = id, "product deleted");
    Ok(product)
}

// =============================================================================
// BROWSING
// =============================================================================

/// Products matching `filter`, in id order.
pub async fn filter_products(state: &AppState, filter: &ProductFilter) -> Vec<Product> {
    list_products(state).await.into_iter().filter(|p| filter.matches(p)).collect()
}

/// `"all"` followed by each distinct category in first-seen order.
pub async fn categories(state: &AppState) -> Vec<String> {
    let products = list_products(state).await;
    let mut out = vec![ALL_CATEGORIES.to_owned()];
    push_unique(&mut out, products.iter().map(|p| p.category.as_str()));
    out
}

/// Distinct filter sidebar values across the catalog.
pub async fn facets(state: &AppState) -> ProductFacets {
    let products = list_products(state).await;
    let mut facets = ProductFacets::default();
    push_unique(&mut facets.categories, products.iter().map(|p| p.category.as_str()));
    push_unique(&mut facets.colors, products.iter().flat_map(|p| p.colors.iter().map(String::as_str)));
    push_unique(&mut facets.sizes, products.iter().flat_map(|p| p.sizes.iter().map(String::as_str)));
    push_unique(&mut facets.types, products.iter().map(Product::product_type));
    facets
}

fn push_unique<'a>(out: &mut Vec<String>, values: impl Iterator<Item = &'a str>) {
    for v in values {
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_owned());
        }
    }
}

// =============================================================================
// PRICING
// =============================================================================

/// Quote `quantity` units of a product. Quantities below 1 are treated as 1.
///
/// # Errors
///
/// Returns `Store(NotFound)` for an unknown product and `Schedule` / `NoTier`
/// for malformed pricing data.
pub async fn bulk_pricing(state: &AppState, product_id: RecordId, quantity: u32) -> Result<BulkQuote, ProductError> {
    let product = get_product(state, product_id).await?;
    let quantity = quantity.max(1);
    let tiers = product.tiers()?;
    let tier = pricing::select_tier(&tiers, quantity).ok_or(ProductError::NoTier { product_id, quantity })?;
    let summary = pricing::price_summary(product.base_price, tier, quantity);
    debug!(product_id, quantity, unit_price = summary.unit_price, "bulk quote");
    Ok(BulkQuote { product, tiers, summary })
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
