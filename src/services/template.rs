//! Template service: the gallery of ready-made artwork.

use serde::{Deserialize, Serialize};
use studio::design::DesignDescriptor;
use tracing::info;

use crate::error::ErrorCode;
use crate::state::AppState;
use crate::store::{Record, RecordId, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub design_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl Record for Template {
    const KIND: &'static str = "template";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Template {
    /// Studio descriptor placing this template's artwork at the default spot.
    #[must_use]
    pub fn descriptor(&self) -> DesignDescriptor {
        DesignDescriptor::template(self.id, self.design_url.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub design_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for TemplateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
        }
    }
}

pub async fn list_templates(state: &AppState) -> Vec<Template> {
    state.simulate_latency().await;
    state.templates.list().await
}

/// # Errors
///
/// Returns `Store(NotFound)` if no template has this id.
pub async fn get_template(state: &AppState, id: RecordId) -> Result<Template, TemplateError> {
    state.simulate_latency().await;
    Ok(state.templates.get(id).await?)
}

/// Templates in exactly `category`.
pub async fn templates_by_category(state: &AppState, category: &str) -> Vec<Template> {
    list_templates(state)
        .await
        .into_iter()
        .filter(|t| t.category == category)
        .collect()
}

pub async fn create_template(state: &AppState, template: Template) -> Template {
    state.simulate_latency().await;
    let template = state.templates.insert(template).await;
    info!(template_id = template.id, name = %template.name, "template created");
    template
}

/// # Errors
///
/// Returns `Store(NotFound)` if no template has this id.
pub async fn update_template(state: &AppState, id: RecordId, update: TemplateUpdate) -> Result<Template, TemplateError> {
    state.simulate_latency().await;
    let mut template = state.templates.get(id).await?;
    if let Some(name) = update.name {
        template.name = name;
    }
    if let Some(category) = update.category {
        template.category = category;
    }
    if let Some(design_url) = update.design_url {
        template.design_url = design_url;
    }
    if let Some(thumbnail_url) = update.thumbnail_url {
        template.thumbnail_url = thumbnail_url;
    }
    Ok(state.templates.update(template).await?)
}

/// # Errors
///
/// Returns `Store(NotFound)` if no template has this id.
pub async fn delete_template(state: &AppState, id: RecordId) -> Result<Template, TemplateError> {
    state.simulate_latency().await;
    let template = state.templates.remove(id).await?;
    info!(template_id = id, "template deleted");
    Ok(template)
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
