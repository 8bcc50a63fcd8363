#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas space (CSS pixels, origin at the canvas top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A square of edge `edge`.
    #[must_use]
    pub fn square(edge: f64) -> Self {
        Self { width: edge, height: edge }
    }
}

/// Axis-aligned rectangle: top-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Inclusive containment: points on the edges count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.origin.x
            && pt.x <= self.origin.x + self.size.width
            && pt.y >= self.origin.y
            && pt.y <= self.origin.y + self.size.height
    }
}

/// Clamp `value` into `[0, limit]`. A negative `limit` (item larger than the
/// container) pins the value to 0.
#[must_use]
pub fn clamp_axis(value: f64, limit: f64) -> f64 {
    value.clamp(0.0, limit.max(0.0))
}

/// Clamp a top-left position so a box of `size` stays inside `bounds`.
#[must_use]
pub fn clamp_into(pos: Point, size: Size, bounds: Size) -> Point {
    Point {
        x: clamp_axis(pos.x, bounds.width - size.width),
        y: clamp_axis(pos.y, bounds.height - size.height),
    }
}

/// Top-left position that centers a box of `size` within `bounds`.
#[must_use]
pub fn centered(size: Size, bounds: Size) -> Point {
    Point { x: (bounds.width - size.width) / 2.0, y: (bounds.height - size.height) / 2.0 }
}
