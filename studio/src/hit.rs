#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::design::{Design, DesignId};
use crate::geom::Point;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub design_id: DesignId,
}

/// Test whether `pt` lands on the design's unrotated bounding box.
///
/// Rotation is cosmetic and deliberately ignored here.
#[must_use]
pub fn hit_test(pt: Point, design: Option<&Design>) -> Option<Hit> {
    let design = design?;
    if !pt.is_finite() {
        return None;
    }
    design
        .placement
        .bounds()
        .contains(pt)
        .then_some(Hit { design_id: design.id })
}
