//! # Provider Registry
//!
//! Insertion-ordered collection of registered product providers.
//!
//! Registration takes the write lock and appends. Lookups take the read lock
//! only long enough to clone a snapshot, so a fan-out already in flight keeps
//! its own provider list and never observes a partially applied
//! registration.

use crate::infrastructure::providers::ProductProvider;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, ordered list of providers.
pub type ProviderSnapshot = Arc<[Arc<dyn ProductProvider>]>;

/// Concurrency-safe registry of product providers.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: RwLock<ProviderSnapshot>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self {
            providers: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    pub fn register(&self, provider: Arc<dyn ProductProvider>) {
        let mut providers = self.providers.write();
        let mut next: Vec<Arc<dyn ProductProvider>> = providers.iter().cloned().collect();
        next.push(provider);
        *providers = Arc::from(next);
    }

    /// Returns the providers registered at this instant, in registration
    /// order.
    #[must_use]
    pub fn snapshot(&self) -> ProviderSnapshot {
        self.providers.read().clone()
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Returns true if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
