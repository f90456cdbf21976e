//! # GetProduct
//!
//! Barcode product lookup that aggregates concurrent answers from several
//! product providers.
//!
//! A lookup fans a barcode out to every registered
//! [`ProductProvider`](infrastructure::providers::ProductProvider), collects
//! the answers that arrive before the deadline and either returns the first
//! one, the best-rated one, or all of them. An optional
//! [`ProductCache`](infrastructure::cache::ProductCache) short-circuits
//! best-product lookups.
//!
//! # Layers
//!
//! - [`domain`]: `Product` and `Barcode`
//! - [`application`]: the [`ProductAggregationEngine`](application::services::ProductAggregationEngine)
//! - [`infrastructure`]: providers and caches
//! - [`api`]: REST endpoints
//! - [`context`]: cancellation and deadline plumbing
//! - [`config`], [`telemetry`], [`bootstrap`]: process wiring

pub mod api;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod context;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
