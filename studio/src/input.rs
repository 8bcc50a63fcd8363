//! Input model: the drag gesture state machine.
//!
//! `DragState` is the gesture tracked between pointer-down and pointer-up.
//! A drag carries the pointer's offset from the design's top-left corner so
//! the design does not jump to the pointer when the drag starts.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving the design across the canvas.
    Dragging {
        /// Pointer position minus design top-left, captured at drag start.
        grab_offset: Point,
    },
}

impl DragState {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Candidate top-left for a pointer at `pointer`, before clamping.
    ///
    /// `None` when idle.
    #[must_use]
    pub fn candidate(&self, pointer: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging { grab_offset } => Some(pointer.offset_from(*grab_offset)),
        }
    }
}
