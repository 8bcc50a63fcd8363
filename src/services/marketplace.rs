//! Marketplace service: community designs for sale.
//!
//! DESIGN
//! ======
//! Browsing is a pure filter + sort over the listing. Sorting is stable over
//! the id-ordered list, so ties always fall back to ascending id. A purchase
//! flips `is_purchased` once and counts as a download toward popularity; a
//! second purchase of the same design is an error. Only purchased designs
//! can be opened in the studio.

use serde::{Deserialize, Serialize};
use studio::design::DesignDescriptor;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::state::AppState;
use crate::store::{Record, RecordId, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceDesign {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub price: f64,
    pub creator: String,
    pub preview_url: String,
    /// Download count.
    #[serde(default)]
    pub popularity: u32,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub is_purchased: bool,
}

impl Record for MarketplaceDesign {
    const KIND: &'static str = "marketplace design";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl MarketplaceDesign {
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Price bucket filter. Bounds are half-open so every price lands in one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "free")]
    Free,
    /// `0 < price < 5`
    #[serde(rename = "1-5")]
    OneToFive,
    /// `5 <= price < 15`
    #[serde(rename = "5-15")]
    FiveToFifteen,
    /// `price >= 15`
    #[serde(rename = "15+")]
    FifteenPlus,
}

impl PriceRange {
    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::All => true,
            Self::Free => price == 0.0,
            Self::OneToFive => price > 0.0 && price < 5.0,
            Self::FiveToFifteen => (5.0..15.0).contains(&price),
            Self::FifteenPlus => price >= 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Most downloaded first.
    #[default]
    Popularity,
    /// Most recently listed first.
    Newest,
    PriceLow,
    PriceHigh,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketplaceQuery {
    /// Case-insensitive match against title, description, or any tag.
    pub search: String,
    /// A category, or `None` / `"all"` for every category.
    pub category: Option<String>,
    pub price_range: PriceRange,
    pub sort: SortBy,
}

impl MarketplaceQuery {
    #[must_use]
    pub fn matches(&self, design: &MarketplaceDesign) -> bool {
        let needle = self.search.trim().to_lowercase();
        let category_ok = match self.category.as_deref() {
            None | Some("all") => true,
            Some(c) => design.category == c,
        };
        category_ok && self.price_range.contains(design.price) && design.matches_search(&needle)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("design {0} already purchased")]
    AlreadyPurchased(RecordId),
    #[error("design {0} has not been purchased")]
    NotPurchased(RecordId),
}

impl ErrorCode for MarketplaceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::AlreadyPurchased(_) => "E_ALREADY_PURCHASED",
            Self::NotPurchased(_) => "E_NOT_PURCHASED",
        }
    }
}

pub async fn list_marketplace(state: &AppState) -> Vec<MarketplaceDesign> {
    state.simulate_latency().await;
    state.marketplace.list().await
}

/// # Errors
///
/// Returns `Store(NotFound)` if no design has this id.
pub async fn get_marketplace_design(state: &AppState, id: RecordId) -> Result<MarketplaceDesign, MarketplaceError> {
    state.simulate_latency().await;
    Ok(state.marketplace.get(id).await?)
}

/// Designs matching `query`, in the requested order.
pub async fn browse(state: &AppState, query: &MarketplaceQuery) -> Vec<MarketplaceDesign> {
    let mut designs: Vec<MarketplaceDesign> =
        list_marketplace(state).await.into_iter().filter(|d| query.matches(d)).collect();
    sort_designs(&mut designs, query.sort);
    designs
}

fn sort_designs(designs: &mut [MarketplaceDesign], sort: SortBy) {
    match sort {
        SortBy::Popularity => designs.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        SortBy::Newest => designs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::PriceLow => designs.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::PriceHigh => designs.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
}

/// Mark a design purchased and count the download.
///
/// # Errors
///
/// Returns `AlreadyPurchased` on a repeat purchase and `Store(NotFound)` for
/// an unknown id.
pub async fn purchase(state: &AppState, id: RecordId) -> Result<MarketplaceDesign, MarketplaceError> {
    let mut design = get_marketplace_design(state, id).await?;
    if design.is_purchased {
        warn!(design_id = id, "repeat purchase rejected");
        return Err(MarketplaceError::AlreadyPurchased(id));
    }
    design.is_purchased = true;
    design.popularity = design.popularity.saturating_add(1);
    let design = state.marketplace.update(design).await?;
    info!(design_id = id, price = design.price, free = design.is_free(), "design purchased");
    Ok(design)
}

/// Descriptor that opens a purchased design in the studio.
///
/// # Errors
///
/// Returns `NotPurchased` if the design has not been bought yet.
pub async fn open_in_studio(state: &AppState, id: RecordId) -> Result<DesignDescriptor, MarketplaceError> {
    let design = get_marketplace_design(state, id).await?;
    if !design.is_purchased {
        return Err(MarketplaceError::NotPurchased(id));
    }
    Ok(DesignDescriptor::marketplace(design.id, design.preview_url))
}

#[cfg(test)]
#[path = "marketplace_test.rs"]
mod tests;
