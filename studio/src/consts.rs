//! Shared numeric constants for the studio crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default mockup canvas width in CSS pixels.
pub const CANVAS_WIDTH: f64 = 400.0;

/// Default mockup canvas height in CSS pixels.
pub const CANVAS_HEIGHT: f64 = 500.0;

// ── Design size ─────────────────────────────────────────────────

/// Smallest edge length a design may be scaled to.
pub const MIN_DESIGN_SIZE: f64 = 50.0;

/// Largest edge length a design may be scaled to.
pub const MAX_DESIGN_SIZE: f64 = 300.0;

/// Edge length applied on upload, template selection, and reset.
pub const DEFAULT_DESIGN_SIZE: f64 = 150.0;

// ── Upload ──────────────────────────────────────────────────────

/// Largest artwork file accepted by the uploader (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

// ── Rotation ────────────────────────────────────────────────────

/// Upper bound of the rotation slider, in degrees.
pub const MAX_ROTATION_DEG: f64 = 360.0;

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";
