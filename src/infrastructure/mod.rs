//! # Infrastructure Layer
//!
//! Adapters for external systems.
//!
//! - [`providers`]: remote product data sources
//! - [`cache`]: local product stores

pub mod cache;
pub mod providers;
