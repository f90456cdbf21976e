//! # Product Cache Trait
//!
//! Port definition for the optional local product store.
//!
//! The aggregation engine reads the cache as a fast path and writes the
//! winning product back on a best-effort basis. It never inspects the
//! specific error kind returned by an implementation, only success or
//! failure. Consistency of concurrent writes to the same barcode is the
//! implementation's responsibility.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::cache::error::CacheResult;
use async_trait::async_trait;
use std::fmt;

/// A local store of products keyed by barcode.
#[async_trait]
pub trait ProductCache: Send + Sync + fmt::Debug {
    /// Fetches the cached product for `barcode`, if any.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the backend cannot be read.
    async fn fetch(&self, ctx: &LookupContext, barcode: &Barcode) -> CacheResult<Option<Product>>;

    /// Stores `product` under its barcode, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the backend cannot be written.
    async fn add(&self, ctx: &LookupContext, product: &Product) -> CacheResult<()>;

    /// Removes the entry for `barcode`. Removing a missing entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the backend cannot be written.
    async fn delete(&self, ctx: &LookupContext, barcode: &Barcode) -> CacheResult<()>;
}
