//! Print-on-demand storefront core.
//!
//! Services for the product catalog, template gallery, saved designs, cart,
//! and design marketplace, all backed by injected in-memory repositories
//! seeded from embedded fixtures. Design placement lives in the `studio`
//! crate; this crate composes it with the bulk pricing calculator.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`pricing`] | Quantity-break schedules, tier selection, price summaries |
//! | [`store`] | `Repository` trait and the `MemoryStore` backend |
//! | [`services`] | One module per storefront collection |
//! | [`state`] | Shared `AppState` handed to every service call |
//! | [`fixtures`] | Embedded seed data and product schedule validation |
//! | [`config`] | `StoreConfig` read from the environment |
//! | [`error`] | `ErrorCode` trait shared by every error enum |

pub mod config;
pub mod error;
pub mod fixtures;
pub mod pricing;
pub mod services;
pub mod state;
pub mod store;
