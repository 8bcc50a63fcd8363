//! Storefront services.
//!
//! ARCHITECTURE
//! ============
//! Each module owns one collection: its record type, its error type, and the
//! async functions the presentation layer calls. Services reach storage only
//! through the repositories on `AppState`.

pub mod cart;
pub mod marketplace;
pub mod product;
pub mod saved_design;
pub mod template;
