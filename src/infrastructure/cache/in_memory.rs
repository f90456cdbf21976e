//! # In-Memory Product Cache
//!
//! In-memory implementation of [`ProductCache`].
//!
//! This implementation uses a thread-safe `HashMap` for storage, suitable
//! for single-process deployments and tests.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::cache::error::CacheResult;
use crate::infrastructure::cache::traits::ProductCache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ProductCache`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCache {
    storage: Arc<RwLock<HashMap<Barcode, Product>>>,
}

impl InMemoryProductCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached products.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clears all cached products.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl ProductCache for InMemoryProductCache {
    async fn fetch(&self, _ctx: &LookupContext, barcode: &Barcode) -> CacheResult<Option<Product>> {
        let storage = self.storage.read().await;
        Ok(storage.get(barcode).cloned())
    }

    async fn add(&self, _ctx: &LookupContext, product: &Product) -> CacheResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(product.barcode().clone(), product.clone());
        Ok(())
    }

    async fn delete(&self, _ctx: &LookupContext, barcode: &Barcode) -> CacheResult<()> {
        let mut storage = self.storage.write().await;
        storage.remove(barcode);
        Ok(())
    }
}
