use uuid::Uuid;

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CURSOR_DEFAULT, CURSOR_GRAB, CURSOR_GRABBING, DEFAULT_DESIGN_SIZE, MAX_DESIGN_SIZE,
    MAX_ROTATION_DEG, MIN_DESIGN_SIZE,
};
use crate::design::{Design, DesignDescriptor, Placement, PlacementUpdate};
use crate::geom::{Point, Size, centered, clamp_into};
use crate::hit::hit_test;
use crate::input::DragState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from pointer handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The design moved, resized, or rotated; carries the new placement.
    PlacementChanged(Placement),
    /// The host should switch the canvas cursor.
    SetCursor(String),
    RenderNeeded,
}

/// Owns the active design and translates gestures into constrained placement updates.
///
/// Every operation is a no-op when no design is loaded. Non-finite numeric
/// input is rejected and the previous value kept.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    design: Option<Design>,
    drag: DragState,
    canvas: Size,
    cursor: &'static str,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::with_canvas(Size::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }
}

impl PlacementEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine for a canvas of the given dimensions.
    #[must_use]
    pub fn with_canvas(canvas: Size) -> Self {
        Self { design: None, drag: DragState::Idle, canvas, cursor: CURSOR_DEFAULT }
    }

    // --- Design lifecycle ---

    /// Replace the active design from an upload or template descriptor.
    ///
    /// Descriptor values pass through the same clamps as interactive edits;
    /// a non-finite size or rotation falls back to the default.
    pub fn load_design(&mut self, descriptor: DesignDescriptor) -> Placement {
        let size = Size::square(clamp_size(finite_or(descriptor.initial_size, DEFAULT_DESIGN_SIZE)));
        let rotation = clamp_rotation(finite_or(descriptor.initial_rotation, 0.0));
        let position = descriptor
            .initial_position
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| centered(size, self.canvas));
        let placement = Placement { position: clamp_into(position, size, self.canvas), size, rotation };

        self.design = Some(Design {
            id: Uuid::new_v4(),
            image_ref: descriptor.image_ref,
            source: descriptor.source,
            placement,
        });
        self.drag = DragState::Idle;
        placement
    }

    /// Drop the active design and any gesture in progress.
    pub fn remove_design(&mut self) -> Option<Design> {
        self.drag = DragState::Idle;
        self.cursor = CURSOR_DEFAULT;
        self.design.take()
    }

    // --- Drag gesture ---

    /// Start dragging if `pointer` lies on the design. Returns whether a drag started.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        let Some(design) = self.design.as_ref() else {
            return false;
        };
        if hit_test(pointer, Some(design)).is_none() {
            return false;
        }
        self.drag = DragState::Dragging { grab_offset: pointer.offset_from(design.placement.position) };
        true
    }

    /// Move the design under the pointer, keeping its box inside the canvas.
    ///
    /// Returns the new position, or `None` when no drag is active or the
    /// pointer is not a finite point.
    pub fn continue_drag(&mut self, pointer: Point) -> Option<Point> {
        if !pointer.is_finite() {
            return None;
        }
        let candidate = self.drag.candidate(pointer)?;
        let canvas = self.canvas;
        let placement = &mut self.design.as_mut()?.placement;
        placement.position = clamp_into(candidate, placement.size, canvas);
        Some(placement.position)
    }

    /// Finish the drag. The last clamped position is kept.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    // --- Control panel ---

    /// Set the edge length, clamped to `[MIN_DESIGN_SIZE, MAX_DESIGN_SIZE]`.
    ///
    /// The position is re-clamped so the resized box stays on the canvas.
    pub fn set_size(&mut self, width: f64) -> Option<Placement> {
        let canvas = self.canvas;
        let placement = &mut self.design.as_mut()?.placement;
        if width.is_finite() {
            placement.size = Size::square(clamp_size(width));
            placement.position = clamp_into(placement.position, placement.size, canvas);
        }
        Some(*placement)
    }

    /// Set rotation in degrees, clamped to `[0, MAX_ROTATION_DEG]`.
    pub fn set_rotation(&mut self, degrees: f64) -> Option<Placement> {
        let placement = &mut self.design.as_mut()?.placement;
        if degrees.is_finite() {
            placement.rotation = clamp_rotation(degrees);
        }
        Some(*placement)
    }

    /// Move the design to `pos`, clamped to the canvas. A non-finite axis keeps its old value.
    pub fn set_position(&mut self, pos: Point) -> Option<Placement> {
        let canvas = self.canvas;
        let placement = &mut self.design.as_mut()?.placement;
        let next = Point::new(finite_or(pos.x, placement.position.x), finite_or(pos.y, placement.position.y));
        placement.position = clamp_into(next, placement.size, canvas);
        Some(*placement)
    }

    /// Center the design at its current size.
    pub fn center(&mut self) -> Option<Placement> {
        let canvas = self.canvas;
        let placement = &mut self.design.as_mut()?.placement;
        placement.position = clamp_into(centered(placement.size, canvas), placement.size, canvas);
        Some(*placement)
    }

    /// Restore default size, zero rotation, and the centered position.
    pub fn reset(&mut self) -> Option<Placement> {
        let canvas = self.canvas;
        let placement = &mut self.design.as_mut()?.placement;
        placement.size = Size::square(DEFAULT_DESIGN_SIZE);
        placement.rotation = 0.0;
        placement.position = clamp_into(centered(placement.size, canvas), placement.size, canvas);
        Some(*placement)
    }

    /// Apply a sparse control-panel update. Size goes first so the position
    /// is clamped against the new size.
    pub fn apply_update(&mut self, update: &PlacementUpdate) -> Option<Placement> {
        let mut placement = self.placement()?;
        if let Some(size) = update.size {
            placement = self.set_size(size)?;
        }
        if let Some(rotation) = update.rotation {
            placement = self.set_rotation(rotation)?;
        }
        if update.x.is_some() || update.y.is_some() {
            let pos = Point::new(
                update.x.unwrap_or(placement.position.x),
                update.y.unwrap_or(placement.position.y),
            );
            placement = self.set_position(pos)?;
        }
        Some(placement)
    }

    // --- Pointer handlers ---

    pub fn on_pointer_down(&mut self, pointer: Point) -> Vec<Action> {
        if self.begin_drag(pointer) {
            return self.cursor_actions(CURSOR_GRABBING);
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        if self.drag.is_dragging() {
            return match self.continue_drag(pointer) {
                Some(_) => self
                    .placement()
                    .map(|p| vec![Action::PlacementChanged(p), Action::RenderNeeded])
                    .unwrap_or_default(),
                None => Vec::new(),
            };
        }
        let next = self.hover_cursor(pointer);
        self.cursor_actions(next)
    }

    pub fn on_pointer_up(&mut self, pointer: Point) -> Vec<Action> {
        self.end_drag();
        let next = self.hover_cursor(pointer);
        self.cursor_actions(next)
    }

    // --- Queries ---

    /// The active design, if any.
    #[must_use]
    pub fn design(&self) -> Option<&Design> {
        self.design.as_ref()
    }

    /// Read-only snapshot of the current placement.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.design.as_ref().map(|d| d.placement)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// The cursor the host should currently show.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Helpers ---

    fn hover_cursor(&self, pointer: Point) -> &'static str {
        if hit_test(pointer, self.design.as_ref()).is_some() { CURSOR_GRAB } else { CURSOR_DEFAULT }
    }

    fn cursor_actions(&mut self, next: &'static str) -> Vec<Action> {
        if self.cursor == next {
            return Vec::new();
        }
        self.cursor = next;
        vec![Action::SetCursor(next.to_owned())]
    }
}

fn clamp_size(width: f64) -> f64 {
    width.clamp(MIN_DESIGN_SIZE, MAX_DESIGN_SIZE)
}

fn clamp_rotation(degrees: f64) -> f64 {
    degrees.clamp(0.0, MAX_ROTATION_DEG)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
