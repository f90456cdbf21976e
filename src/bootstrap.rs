//! Wiring of the aggregation engine from configuration.

use crate::application::services::{AggregationConfig, ProductAggregationEngine};
use crate::config::{AppConfig, CacheBackend, CacheConfig, ProvidersConfig};
use crate::infrastructure::cache::{InMemoryProductCache, ProductCache, RedisProductCache};
use crate::infrastructure::providers::{
    HttpCatalogProvider, MockProductProvider, ProductProvider, StaticCatalogProvider,
};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Builds the engine with every configured provider and cache.
///
/// # Errors
///
/// Returns an error if an HTTP provider URL is invalid or the Redis cache
/// cannot be reached.
pub async fn build_engine(config: &AppConfig) -> anyhow::Result<ProductAggregationEngine> {
    let mut engine =
        ProductAggregationEngine::new(AggregationConfig::with_ceiling(config.lookup.ceiling_ms));

    if let Some(cache) = build_cache(&config.cache).await? {
        engine = engine.with_cache(cache);
    }

    for provider in build_providers(&config.providers)? {
        engine.register(provider);
    }

    info!(
        providers = engine.provider_count(),
        cache = ?config.cache.backend,
        ceiling_ms = config.lookup.ceiling_ms,
        "product aggregation engine ready"
    );
    Ok(engine)
}

/// Creates the providers in registration order: mock, catalogs, HTTP.
///
/// # Errors
///
/// Returns an error if an HTTP provider cannot be created.
pub fn build_providers(config: &ProvidersConfig) -> anyhow::Result<Vec<Arc<dyn ProductProvider>>> {
    let mut providers: Vec<Arc<dyn ProductProvider>> = Vec::new();

    if config.mock {
        providers.push(Arc::new(MockProductProvider::new()));
    }

    for catalog in &config.catalog {
        providers.push(Arc::new(StaticCatalogProvider::new(
            catalog.name.clone(),
            catalog.products.iter().cloned(),
        )));
    }

    for http in &config.http {
        let provider = HttpCatalogProvider::new(http.name.clone(), &http.base_url, http.timeout_ms)
            .with_context(|| format!("failed to create http provider {}", http.name))?;
        providers.push(Arc::new(provider));
    }

    Ok(providers)
}

/// Creates the configured cache, if any.
///
/// # Errors
///
/// Returns an error if the Redis backend is selected and cannot be reached.
pub async fn build_cache(config: &CacheConfig) -> anyhow::Result<Option<Arc<dyn ProductCache>>> {
    match config.backend {
        CacheBackend::None => Ok(None),
        CacheBackend::Memory => Ok(Some(Arc::new(InMemoryProductCache::new()))),
        CacheBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("cache.redis_url is required for the redis backend")?;
            let cache = RedisProductCache::connect(url, config.key_prefix.clone(), config.ttl())
                .await
                .context("failed to connect to redis product cache")?;
            Ok(Some(Arc::new(cache)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::HttpProviderConfig;
    use crate::context::LookupContext;
    use crate::domain::value_objects::Barcode;

    #[tokio::test]
    async fn default_config_registers_mock() {
        let engine = build_engine(&AppConfig::default()).await.unwrap();
        assert_eq!(engine.provider_count(), 1);
        assert!(!engine.has_cache());

        let barcode = Barcode::new("111").unwrap();
        let product = engine.get_best(&LookupContext::new(), &barcode).await.unwrap();
        assert_eq!(product.name(), "TestProduct");
    }

    #[tokio::test]
    async fn catalog_and_memory_cache() {
        let config = AppConfig::from_toml(
            r#"
            [cache]
            backend = "memory"

            [providers]
            mock = false

            [[providers.catalog]]
            name = "shelf"
            products = [{ barcode = "222", name = "Bread" }]
            "#,
        )
        .unwrap();

        let engine = build_engine(&config).await.unwrap();
        assert_eq!(engine.provider_count(), 1);
        assert!(engine.has_cache());

        let barcode = Barcode::new("222").unwrap();
        let product = engine.get_best(&LookupContext::new(), &barcode).await.unwrap();
        assert_eq!(product.name(), "Bread");
    }

    #[test]
    fn providers_keep_configured_order() {
        let config = ProvidersConfig {
            mock: true,
            catalog: Vec::new(),
            http: vec![HttpProviderConfig {
                name: "remote".to_string(),
                base_url: "http://localhost:9000/products".to_string(),
                timeout_ms: 1000,
            }],
        };

        let providers = build_providers(&config).unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].name(), "mock");
        assert_eq!(providers[1].name(), "remote");
    }

    #[test]
    fn invalid_http_url_is_rejected() {
        let config = ProvidersConfig {
            mock: false,
            catalog: Vec::new(),
            http: vec![HttpProviderConfig {
                name: "broken".to_string(),
                base_url: "not a url".to_string(),
                timeout_ms: 1000,
            }],
        };

        let error = build_providers(&config).err().unwrap();
        assert!(error.to_string().contains("broken"));
    }

    #[tokio::test]
    async fn unreachable_redis_is_an_error() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            redis_url: Some("not-a-redis-url".to_string()),
            ..CacheConfig::default()
        };
        assert!(build_cache(&config).await.is_err());
    }
}
