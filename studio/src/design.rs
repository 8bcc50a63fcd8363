//! Design model: descriptors that create a design, the placement it carries,
//! and sparse updates coming from the control panel.
//!
//! A `DesignDescriptor` is what the upload and template collaborators hand
//! to the engine. The engine turns it into a `Design`, whose `Placement` is
//! the only thing the drag/resize/rotate operations mutate. `PlacementUpdate`
//! mirrors the control-panel sliders: only present fields are applied.

#[cfg(test)]
#[path = "design_test.rs"]
mod design_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_DESIGN_SIZE;
use crate::geom::{Point, Rect, Size};

/// Unique identifier for a design placed in the studio.
pub type DesignId = Uuid;

/// Where the artwork came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DesignSource {
    /// Artwork uploaded by the user.
    Upload,
    /// Artwork taken from the template gallery.
    Template { template_id: u64 },
    /// A design bought from the marketplace.
    Marketplace { design_id: u64 },
}

/// Input for creating a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDescriptor {
    /// URL or data reference of the artwork image.
    pub image_ref: String,
    pub source: DesignSource,
    /// Top-left corner; `None` centers the design on the canvas.
    pub initial_position: Option<Point>,
    /// Edge length of the square design.
    pub initial_size: f64,
    /// Rotation in degrees.
    pub initial_rotation: f64,
}

impl DesignDescriptor {
    /// Descriptor for freshly uploaded artwork with default placement.
    #[must_use]
    pub fn upload(image_ref: impl Into<String>) -> Self {
        Self {
            image_ref: image_ref.into(),
            source: DesignSource::Upload,
            initial_position: None,
            initial_size: DEFAULT_DESIGN_SIZE,
            initial_rotation: 0.0,
        }
    }

    /// Descriptor for a template selection with default placement.
    #[must_use]
    pub fn template(template_id: u64, image_ref: impl Into<String>) -> Self {
        Self { source: DesignSource::Template { template_id }, ..Self::upload(image_ref) }
    }

    /// Descriptor for a purchased marketplace design with default placement.
    #[must_use]
    pub fn marketplace(design_id: u64, image_ref: impl Into<String>) -> Self {
        Self { source: DesignSource::Marketplace { design_id }, ..Self::upload(image_ref) }
    }
}

/// Position, size, and rotation of a design on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Top-left corner in canvas pixels.
    pub position: Point,
    /// Width and height; always square.
    pub size: Size,
    /// Clockwise rotation in degrees around the design center. Cosmetic only.
    pub rotation: f64,
}

impl Placement {
    /// Unrotated bounding box used for hit-testing.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// A design that is live in the studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: DesignId,
    pub image_ref: String,
    pub source: DesignSource,
    pub placement: Placement,
}

/// Sparse placement edit from the control panel. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New edge length (width and height move together).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PlacementUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.size.is_none() && self.rotation.is_none()
    }
}
