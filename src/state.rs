//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is passed by reference into every service function. It holds
//! the config and one injected repository per collection. Clone is cheap:
//! every repository is behind an `Arc`, so clones share the same records.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::services::cart::CartItem;
use crate::services::marketplace::MarketplaceDesign;
use crate::services::product::Product;
use crate::services::saved_design::SavedDesign;
use crate::services::template::Template;
use crate::store::{MemoryStore, Repository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: StoreConfig,
    pub products: Arc<dyn Repository<Product>>,
    pub templates: Arc<dyn Repository<Template>>,
    pub saved_designs: Arc<dyn Repository<SavedDesign>>,
    pub cart: Arc<dyn Repository<CartItem>>,
    pub marketplace: Arc<dyn Repository<MarketplaceDesign>>,
}

impl AppState {
    /// State backed by empty in-memory stores.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            products: Arc::new(MemoryStore::new()),
            templates: Arc::new(MemoryStore::new()),
            saved_designs: Arc::new(MemoryStore::new()),
            cart: Arc::new(MemoryStore::new()),
            marketplace: Arc::new(MemoryStore::new()),
        }
    }

    /// Sleep for the configured artificial latency, if any.
    pub async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}
