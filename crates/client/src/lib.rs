//! HTTP client for the café catalog API.
//!
//! [`api::CatalogApi`] wraps the REST endpoints with [`reqwest`];
//! [`fetcher::HttpPageFetcher`] adapts it to the listing presenter's
//! [`cafe_core::fetch::PageFetcher`] boundary.

pub mod api;
pub mod config;
pub mod fetcher;
