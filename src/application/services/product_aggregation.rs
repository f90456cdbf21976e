//! # Product Aggregation Engine
//!
//! Orchestrates product lookups across every registered provider.
//!
//! This module provides the [`ProductAggregationEngine`], which fans a
//! barcode lookup out to all providers concurrently, collects whatever
//! answers arrive before the deadline, picks a winner with a
//! [`RankingStrategy`] and writes it back to an optional [`ProductCache`].
//!
//! Every lookup, including its cache read, is bounded by the earlier of the
//! caller's deadline and [`AggregationConfig::ceiling_ms`]. Cache write-back
//! runs in a detached task with its own ceiling, so a slow cache never holds
//! up the caller.
//!
//! # Examples
//!
//! ```
//! use getproduct::application::services::ProductAggregationEngine;
//! use getproduct::context::LookupContext;
//! use getproduct::domain::value_objects::Barcode;
//! use getproduct::infrastructure::providers::MockProductProvider;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = ProductAggregationEngine::with_defaults();
//! engine.register(Arc::new(MockProductProvider::new()));
//!
//! let barcode = Barcode::new("111").unwrap();
//! let product = engine.get_best(&LookupContext::new(), &barcode).await.unwrap();
//! assert_eq!(product.name(), "TestProduct");
//! # }
//! ```

use crate::application::error::{LookupError, LookupResult};
use crate::application::services::fan_out::{FanOut, FanOutEvent};
use crate::application::services::provider_registry::ProviderRegistry;
use crate::application::services::ranking_strategy::{HighestRatingStrategy, RankingStrategy};
use crate::context::{Interrupted, LookupContext};
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::cache::ProductCache;
use crate::infrastructure::providers::ProductProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default ceiling on the duration of a single lookup.
pub const DEFAULT_CEILING_MS: u64 = 10_000;

/// Configuration for product aggregation.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Upper bound on every lookup in milliseconds, applied even when the
    /// caller's own deadline is later.
    pub ceiling_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            ceiling_ms: DEFAULT_CEILING_MS,
        }
    }
}

impl AggregationConfig {
    /// Creates a new configuration with the specified ceiling.
    #[must_use]
    pub fn with_ceiling(ceiling_ms: u64) -> Self {
        Self { ceiling_ms }
    }

    /// Returns the ceiling as a duration.
    #[must_use]
    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }
}

/// How a collect-all pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectionEnd {
    Exhausted,
    DeadlineElapsed,
    Cancelled,
}

/// Products gathered by a collect-all pass, in arrival order.
#[derive(Debug)]
struct Collected {
    products: Vec<Product>,
    end: CollectionEnd,
}

impl Collected {
    /// Maps an empty collection onto the error matching how it ended.
    fn non_empty(self, barcode: &Barcode) -> LookupResult<Vec<Product>> {
        if !self.products.is_empty() {
            return Ok(self.products);
        }
        Err(match self.end {
            CollectionEnd::Exhausted => LookupError::not_found(barcode.as_str()),
            CollectionEnd::DeadlineElapsed => LookupError::deadline_exceeded(barcode.as_str()),
            CollectionEnd::Cancelled => LookupError::cancelled(barcode.as_str()),
        })
    }
}

/// Engine for resolving products from multiple providers.
#[derive(Debug)]
pub struct ProductAggregationEngine {
    registry: ProviderRegistry,
    cache: Option<Arc<dyn ProductCache>>,
    ranking_strategy: Arc<dyn RankingStrategy>,
    config: AggregationConfig,
}

impl Default for ProductAggregationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ProductAggregationEngine {
    /// Creates a new engine with no providers and no cache.
    #[must_use]
    pub fn new(config: AggregationConfig) -> Self {
        Self {
            registry: ProviderRegistry::new(),
            cache: None,
            ranking_strategy: Arc::new(HighestRatingStrategy::new()),
            config,
        }
    }

    /// Creates a new engine with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AggregationConfig::default())
    }

    /// Builder: attach the local product cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ProductCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builder: replace the ranking strategy.
    #[must_use]
    pub fn with_ranking_strategy(mut self, ranking_strategy: Arc<dyn RankingStrategy>) -> Self {
        self.ranking_strategy = ranking_strategy;
        self
    }

    /// Registers a provider. Safe to call while lookups are in flight; those
    /// lookups keep the provider list they started with.
    pub fn register(&self, provider: Arc<dyn ProductProvider>) {
        debug!(provider = provider.name(), "registering product provider");
        self.registry.register(provider);
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if a local cache is configured.
    #[must_use]
    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }

    /// Returns the first product any provider delivers.
    ///
    /// Arrival order decides; no ranking and no cache interaction take
    /// place. Providers still running when the first product arrives are
    /// cancelled.
    ///
    /// # Errors
    ///
    /// - `LookupError::NoProviders` - No provider is registered
    /// - `LookupError::NotFound` - Every provider finished without a product
    /// - `LookupError::DeadlineExceeded` - The deadline elapsed first
    /// - `LookupError::Cancelled` - The caller cancelled first
    pub async fn get_first(&self, ctx: &LookupContext, barcode: &Barcode) -> LookupResult<Product> {
        let mut fan_out = self.start_fan_out(self.bounded(ctx), barcode)?;
        info!(%barcode, providers = fan_out.queried(), "getting product by barcode");

        match fan_out.next().await {
            FanOutEvent::Product(product) => Ok(product),
            FanOutEvent::Exhausted => Err(LookupError::not_found(barcode.as_str())),
            FanOutEvent::DeadlineElapsed => Err(LookupError::deadline_exceeded(barcode.as_str())),
            FanOutEvent::Cancelled => Err(LookupError::cancelled(barcode.as_str())),
        }
    }

    /// Returns the best-rated product for `barcode`.
    ///
    /// A cache hit is returned without querying any provider. On a miss all
    /// providers are queried until they finish or the deadline elapses; the
    /// winner among the collected products is written back to the cache on
    /// a best-effort basis, including when collection was cut short by the
    /// deadline. A cache read that outlives the lookup bound counts as a
    /// miss.
    ///
    /// # Errors
    ///
    /// - `LookupError::NoProviders` - No provider is registered
    /// - `LookupError::NotFound` - Every provider finished without a product
    /// - `LookupError::DeadlineExceeded` - The deadline elapsed with nothing collected
    /// - `LookupError::Cancelled` - The caller cancelled with nothing collected
    pub async fn get_best(&self, ctx: &LookupContext, barcode: &Barcode) -> LookupResult<Product> {
        self.ensure_providers()?;
        let bounded = self.bounded(ctx);

        if let Some(product) = self.cached(&bounded, barcode).await {
            debug!(%barcode, "cache hit");
            return Ok(product);
        }

        let fan_out = self.start_fan_out(bounded, barcode)?;
        info!(%barcode, providers = fan_out.queried(), "getting the best matching product by barcode");

        let products = self.collect(fan_out).await.non_empty(barcode)?;
        let winner = self.select_winner(products, barcode)?;
        self.write_back(&winner);

        Ok(winner)
    }

    /// Returns every product collected for `barcode`, in arrival order.
    ///
    /// Uses the same collection and deadline policy as
    /// [`get_best`](Self::get_best) without the cache fast path, and writes
    /// the top-ranked product back to the cache as a side effect.
    ///
    /// # Errors
    ///
    /// - `LookupError::NoProviders` - No provider is registered
    /// - `LookupError::NotFound` - Every provider finished without a product
    /// - `LookupError::DeadlineExceeded` - The deadline elapsed with nothing collected
    /// - `LookupError::Cancelled` - The caller cancelled with nothing collected
    pub async fn get_all(&self, ctx: &LookupContext, barcode: &Barcode) -> LookupResult<Vec<Product>> {
        let fan_out = self.start_fan_out(self.bounded(ctx), barcode)?;
        info!(%barcode, providers = fan_out.queried(), "getting all products by barcode");

        let products = self.collect(fan_out).await.non_empty(barcode)?;
        if let Some(winner) = self.ranking_strategy.select(&products) {
            self.write_back(winner);
        }

        Ok(products)
    }

    /// Removes `barcode` from the local cache.
    ///
    /// Succeeds without doing anything when no cache is configured. The
    /// delete is bounded like a lookup.
    ///
    /// # Errors
    ///
    /// - `LookupError::Cache` - The cache rejected the delete
    /// - `LookupError::DeadlineExceeded` - The bound elapsed first
    /// - `LookupError::Cancelled` - The caller cancelled first
    pub async fn delete_cached(&self, ctx: &LookupContext, barcode: &Barcode) -> LookupResult<()> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };

        let bounded = self.bounded(ctx);
        match bounded.run(cache.delete(&bounded, barcode)).await {
            Ok(deleted) => deleted?,
            Err(Interrupted::DeadlineElapsed) => {
                return Err(LookupError::deadline_exceeded(barcode.as_str()));
            }
            Err(Interrupted::Cancelled) => return Err(LookupError::cancelled(barcode.as_str())),
        }
        debug!(%barcode, "deleted cached product");
        Ok(())
    }

    fn ensure_providers(&self) -> LookupResult<()> {
        if self.registry.is_empty() {
            return Err(LookupError::NoProviders);
        }
        Ok(())
    }

    fn bounded(&self, ctx: &LookupContext) -> LookupContext {
        ctx.bounded(self.config.ceiling())
    }

    fn start_fan_out(&self, bounded: LookupContext, barcode: &Barcode) -> LookupResult<FanOut> {
        let providers = self.registry.snapshot();
        if providers.is_empty() {
            return Err(LookupError::NoProviders);
        }

        Ok(FanOut::start(&providers, bounded, barcode))
    }

    async fn collect(&self, mut fan_out: FanOut) -> Collected {
        let mut products = Vec::with_capacity(fan_out.queried());

        let end = loop {
            match fan_out.next().await {
                FanOutEvent::Product(product) => products.push(product),
                FanOutEvent::Exhausted => break CollectionEnd::Exhausted,
                FanOutEvent::DeadlineElapsed => break CollectionEnd::DeadlineElapsed,
                FanOutEvent::Cancelled => break CollectionEnd::Cancelled,
            }
        };

        if end != CollectionEnd::Exhausted {
            debug!(collected = products.len(), ?end, "collection stopped before every provider finished");
        }

        Collected { products, end }
    }

    fn select_winner(&self, products: Vec<Product>, barcode: &Barcode) -> LookupResult<Product> {
        let winner = self
            .ranking_strategy
            .select(&products)
            .cloned()
            .ok_or_else(|| LookupError::not_found(barcode.as_str()))?;
        debug!(
            %barcode,
            candidates = products.len(),
            rating = winner.rating(),
            strategy = self.ranking_strategy.name(),
            "selected best product"
        );
        Ok(winner)
    }

    async fn cached(&self, bounded: &LookupContext, barcode: &Barcode) -> Option<Product> {
        let cache = self.cache.as_ref()?;
        match bounded.run(cache.fetch(bounded, barcode)).await {
            Ok(Ok(product)) => product,
            Ok(Err(error)) => {
                warn!(%barcode, %error, "cache read failed, querying providers");
                None
            }
            Err(interrupted) => {
                warn!(%barcode, %interrupted, "cache read interrupted, querying providers");
                None
            }
        }
    }

    /// Stores `product` in the cache from a detached task bounded by the
    /// ceiling. Failures are logged only.
    fn write_back(&self, product: &Product) {
        let Some(cache) = self.cache.clone() else {
            return;
        };

        let ctx = LookupContext::with_timeout(self.config.ceiling());
        let product = product.clone();
        tokio::spawn(async move {
            let barcode = product.barcode();
            match ctx.run(cache.add(&ctx, &product)).await {
                Ok(Ok(())) => debug!(%barcode, "cached best product"),
                Ok(Err(error)) => warn!(%barcode, %error, "cache write-back failed"),
                Err(interrupted) => warn!(%barcode, %interrupted, "cache write-back interrupted"),
            }
        });
    }
}
