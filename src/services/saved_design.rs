//! Saved design service: designs the user keeps for later.
//!
//! DESIGN
//! ======
//! Every save stamps wall-clock timestamps in epoch milliseconds and every
//! update bumps `version`, so the gallery can show "edited" badges and sort
//! by recency. A lookup of a missing id is not an error (`Ok(None)`), but id
//! 0 is rejected outright.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use studio::design::{Design, DesignDescriptor, Placement};
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::state::AppState;
use crate::store::{Record, RecordId, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub design_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub product_id: Option<RecordId>,
    #[serde(default)]
    pub placement: Option<Placement>,
    pub created_at: i64,
    pub saved_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
    pub version: u32,
}

impl Record for SavedDesign {
    const KIND: &'static str = "saved design";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl SavedDesign {
    /// Descriptor that reopens this design in the studio at its saved placement.
    #[must_use]
    pub fn descriptor(&self) -> DesignDescriptor {
        let mut descriptor = DesignDescriptor::upload(self.design_url.clone());
        if let Some(p) = self.placement {
            descriptor.initial_position = Some(p.position);
            descriptor.initial_size = p.size.width;
            descriptor.initial_rotation = p.rotation;
        }
        descriptor
    }
}

/// Input for a new saved design.
#[derive(Debug, Clone, Default)]
pub struct NewSavedDesign {
    pub name: String,
    pub design_url: String,
    pub thumbnail_url: String,
    pub product_id: Option<RecordId>,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Default)]
pub struct SavedDesignUpdate {
    pub name: Option<String>,
    pub placement: Option<Placement>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SavedDesignError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no design to save")]
    NoDesign,
}

impl ErrorCode for SavedDesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::NoDesign => "E_NO_DESIGN",
        }
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

pub async fn list_saved_designs(state: &AppState) -> Vec<SavedDesign> {
    state.simulate_latency().await;
    state.saved_designs.list().await
}

/// Look up a saved design. A missing id yields `Ok(None)`.
///
/// # Errors
///
/// Returns `Store(InvalidId)` for id 0.
pub async fn get_saved_design(state: &AppState, id: RecordId) -> Result<Option<SavedDesign>, SavedDesignError> {
    state.simulate_latency().await;
    match state.saved_designs.get(id).await {
        Ok(design) => Ok(Some(design)),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Store a new design at version 1 with fresh timestamps.
pub async fn create_saved_design(state: &AppState, input: NewSavedDesign) -> SavedDesign {
    state.simulate_latency().await;
    let now = now_ms();
    let record = SavedDesign {
        id: 0,
        name: input.name,
        design_url: input.design_url,
        thumbnail_url: input.thumbnail_url,
        product_id: input.product_id,
        placement: input.placement,
        created_at: now,
        saved_at: now,
        updated_at: None,
        version: 1,
    };
    let record = state.saved_designs.insert(record).await;
    info!(design_id = record.id, name = %record.name, "design saved");
    record
}

/// Save the studio's active design.
///
/// # Errors
///
/// Returns `NoDesign` when the studio is empty.
pub async fn save_studio_design(
    state: &AppState,
    design: Option<&Design>,
    name: impl Into<String>,
    product_id: Option<RecordId>,
) -> Result<SavedDesign, SavedDesignError> {
    let Some(design) = design else {
        warn!("save requested with no design in the studio");
        return Err(SavedDesignError::NoDesign);
    };
    let input = NewSavedDesign {
        name: name.into(),
        design_url: design.image_ref.clone(),
        thumbnail_url: design.image_ref.clone(),
        product_id,
        placement: Some(design.placement),
    };
    Ok(create_saved_design(state, input).await)
}

/// Apply an update, bump the version, and stamp `updated_at`.
///
/// # Errors
///
/// Returns `Store(InvalidId)` for id 0 and `Store(NotFound)` for an unknown id.
pub async fn update_saved_design(
    state: &AppState,
    id: RecordId,
    update: SavedDesignUpdate,
) -> Result<SavedDesign, SavedDesignError> {
    state.simulate_latency().await;
    let mut record = state.saved_designs.get(id).await?;
    if let Some(name) = update.name {
        record.name = name;
    }
    if let Some(placement) = update.placement {
        record.placement = Some(placement);
    }
    if let Some(thumbnail_url) = update.thumbnail_url {
        record.thumbnail_url = thumbnail_url;
    }
    record.updated_at = Some(now_ms());
    record.version += 1;
    Ok(state.saved_designs.update(record).await?)
}

/// # Errors
///
/// Returns `Store(InvalidId)` for id 0 and `Store(NotFound)` for an unknown id.
pub async fn delete_saved_design(state: &AppState, id: RecordId) -> Result<(), SavedDesignError> {
    state.simulate_latency().await;
    state.saved_designs.remove(id).await?;
    info!(design_id = id, "saved design deleted");
    Ok(())
}

#[cfg(test)]
#[path = "saved_design_test.rs"]
mod tests;
