//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`ProductAggregationEngine`]: Concurrent product collection and ranking
//! - [`ProviderRegistry`]: Concurrency-safe list of registered providers
//! - [`RankingStrategy`]: Strategies for picking the best product
//! - [`FanOut`]: Per-lookup fan-out/fan-in over a provider snapshot

pub mod fan_out;
pub mod product_aggregation;
pub mod provider_registry;
pub mod ranking_strategy;

pub use fan_out::{FanOut, FanOutEvent};
pub use product_aggregation::{AggregationConfig, DEFAULT_CEILING_MS, ProductAggregationEngine};
pub use provider_registry::{ProviderRegistry, ProviderSnapshot};
pub use ranking_strategy::{HighestRatingStrategy, RankingStrategy};
