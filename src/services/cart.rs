//! Cart service: line items for customized products.
//!
//! DESIGN
//! ======
//! A line snapshots the studio design (image and placement) at the moment it
//! is added, so later edits in the studio never change what is in the cart.
//! The unit price is the product's tier price for the line quantity plus the
//! flat design fee from `StoreConfig`. Changing the quantity re-prices the
//! line when the product is still in the catalog; otherwise the stored price
//! is kept.

use serde::{Deserialize, Serialize};
use studio::design::{Design, DesignId, Placement};
use tracing::{debug, info, warn};

use crate::error::ErrorCode;
use crate::services::product::{self, ProductError};
use crate::state::AppState;
use crate::store::{Record, RecordId, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDesign {
    pub design_id: DesignId,
    pub image_ref: String,
    pub placement: Placement,
}

impl From<&Design> for CartDesign {
    fn from(design: &Design) -> Self {
        Self { design_id: design.id, image_ref: design.image_ref.clone(), placement: design.placement }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub product_id: RecordId,
    pub product_name: String,
    pub color: String,
    pub size: String,
    #[serde(default)]
    pub design: Option<CartDesign>,
    pub quantity: u32,
    pub unit_price: f64,
}

impl Record for CartItem {
    const KIND: &'static str = "cart item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Product options picked in the studio sidebar.
#[derive(Debug, Clone, Default)]
pub struct LineOptions {
    pub product_id: RecordId,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error("add a design before adding to cart")]
    NoDesign,
}

impl ErrorCode for CartError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Product(e) => e.error_code(),
            Self::NoDesign => "E_NO_DESIGN",
        }
    }
}

pub async fn list_cart(state: &AppState) -> Vec<CartItem> {
    state.simulate_latency().await;
    state.cart.list().await
}

/// # Errors
///
/// Returns `Store(NotFound)` if no line has this id.
pub async fn get_cart_item(state: &AppState, id: RecordId) -> Result<CartItem, CartError> {
    state.simulate_latency().await;
    Ok(state.cart.get(id).await?)
}

/// Add the studio's active design on a product to the cart.
///
/// Quantity is clamped to at least 1.
///
/// # Errors
///
/// Returns `NoDesign` when the studio is empty and `Product` when the
/// product is unknown or cannot be priced.
pub async fn add_design_to_cart(
    state: &AppState,
    design: Option<&Design>,
    options: LineOptions,
) -> Result<CartItem, CartError> {
    let Some(design) = design else {
        warn!(product_id = options.product_id, "add to cart without a design");
        return Err(CartError::NoDesign);
    };
    let quote = product::bulk_pricing(state, options.product_id, options.quantity).await?;
    let item = CartItem {
        id: 0,
        product_id: quote.product.id,
        product_name: quote.product.name,
        color: options.color,
        size: options.size,
        design: Some(CartDesign::from(design)),
        quantity: quote.summary.quantity,
        unit_price: quote.summary.unit_price + state.config.design_fee,
    };
    state.simulate_latency().await;
    let item = state.cart.insert(item).await;
    info!(
        cart_item_id = item.id,
        product_id = item.product_id,
        quantity = item.quantity,
        unit_price = item.unit_price,
        "added to cart"
    );
    Ok(item)
}

/// Set a line's quantity (at least 1) and re-price it.
///
/// # Errors
///
/// Returns `Store` errors for an unknown line, or `Product` if the product
/// exists but cannot be priced.
pub async fn update_quantity(state: &AppState, id: RecordId, quantity: u32) -> Result<CartItem, CartError> {
    let mut item = get_cart_item(state, id).await?;
    item.quantity = quantity.max(1);
    match product::bulk_pricing(state, item.product_id, item.quantity).await {
        Ok(quote) => item.unit_price = quote.summary.unit_price + state.config.design_fee,
        Err(ProductError::Store(StoreError::NotFound { .. })) => {
            debug!(cart_item_id = id, product_id = item.product_id, "product gone, keeping unit price");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(state.cart.update(item).await?)
}

/// # Errors
///
/// Returns `Store(NotFound)` if no line has this id.
pub async fn remove_from_cart(state: &AppState, id: RecordId) -> Result<CartItem, CartError> {
    state.simulate_latency().await;
    let item = state.cart.remove(id).await?;
    info!(cart_item_id = id, "removed from cart");
    Ok(item)
}

/// Empty the cart, returning the removed lines.
pub async fn clear_cart(state: &AppState) -> Vec<CartItem> {
    state.simulate_latency().await;
    let removed = state.cart.clear().await;
    info!(count = removed.len(), "cart cleared");
    removed
}

/// Sum of `unit_price × quantity` over every line.
pub async fn cart_total(state: &AppState) -> f64 {
    list_cart(state).await.iter().map(CartItem::line_total).sum()
}

/// Total units across all lines (the header badge). Summed as `u64` so
/// several large lines cannot overflow.
pub async fn cart_count(state: &AppState) -> u64 {
    list_cart(state).await.iter().map(|i| u64::from(i.quantity)).sum()
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
