//! Café catalog domain logic.
//!
//! Pure, I/O-free building blocks shared by the backend and by any client
//! that renders a catalog listing: the catalog item model, derived display
//! status, deduplication, filter composition, the incremental (infinite
//! scroll) loader, sentinel observation, and the listing presenter that ties
//! them together. Franchise inquiry validation lives in [`franchise`].

pub mod catalog;
pub mod dedupe;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod franchise;
pub mod loader;
pub mod presenter;
pub mod session;
pub mod status;
pub mod types;
pub mod viewport;
