//! # Product Provider Trait
//!
//! Port definition for remote product data sources.
//!
//! Every data source the aggregation engine can query implements
//! [`ProductProvider`]. Providers are selected at construction time and
//! registered with the engine; the engine never inspects their concrete type.
//!
//! # Examples
//!
//! ```ignore
//! use getproduct::infrastructure::providers::traits::ProductProvider;
//!
//! struct MyCatalog { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl ProductProvider for MyCatalog {
//!     // ... implement required methods
//! }
//! ```

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use std::fmt;

/// A remote source of product records.
///
/// Implementations are independently fallible and independently latent.
/// Long-running fetches should observe [`LookupContext::cancelled`] or the
/// context deadline; the engine also drops in-flight fetches once it stops
/// listening.
#[async_trait]
pub trait ProductProvider: Send + Sync + fmt::Debug {
    /// Returns a short name used in logs.
    fn name(&self) -> &str;

    /// Fetches the product for `barcode`.
    ///
    /// `Ok(None)` and `Err(_)` both mean the provider has nothing usable;
    /// only `Ok(Some(_))` counts as a hit.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NotFound` - The provider does not know the barcode
    /// - `ProviderError::Timeout` - The request timed out
    /// - `ProviderError::Connection` - The source could not be reached
    /// - `ProviderError::Protocol` - The response could not be understood
    async fn fetch(&self, ctx: &LookupContext, barcode: &Barcode)
    -> ProviderResult<Option<Product>>;
}
