//! Design placement engine for the print-on-demand design studio.
//!
//! This crate owns the geometry of a single piece of artwork placed on a
//! product mockup: where it sits, how large it is, and how far it is rotated.
//! The host UI layer forwards pointer events and control-panel edits to the
//! engine and redraws from [`engine::Action`]s and placement snapshots. The
//! engine never renders, never persists, and never blocks.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::PlacementEngine`]: drag, resize, rotate, reset |
//! | [`design`] | Design descriptors, placements, and sparse placement updates |
//! | [`geom`] | Points, sizes, rectangles, and clamping helpers |
//! | [`input`] | The drag gesture state machine |
//! | [`hit`] | Hit-testing pointer positions against the active design |
//! | [`mockup`] | Product color tinting for the mockup preview |
//! | [`upload`] | Artwork file checks before a design is created |
//! | [`consts`] | Canvas dimensions and size/rotation limits |

pub mod consts;
pub mod design;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod mockup;
pub mod upload;
