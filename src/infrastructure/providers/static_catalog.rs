//! # Static Catalog Provider
//!
//! Fixed-list product lookup over an in-memory map.
//!
//! The catalog is built once, typically from products listed in the
//! application configuration, and never changes afterwards.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::providers::error::ProviderResult;
use crate::infrastructure::providers::traits::ProductProvider;
use async_trait::async_trait;
use std::collections::HashMap;

/// Provider answering from a fixed list of products.
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    name: String,
    products: HashMap<Barcode, Product>,
}

impl StaticCatalogProvider {
    /// Creates a catalog from `products`. A later product with the same
    /// barcode replaces an earlier one.
    #[must_use]
    pub fn new(name: impl Into<String>, products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.barcode().clone(), product))
            .collect();
        Self {
            name: name.into(),
            products,
        }
    }

    /// Returns the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductProvider for StaticCatalogProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        _ctx: &LookupContext,
        barcode: &Barcode,
    ) -> ProviderResult<Option<Product>> {
        Ok(self.products.get(barcode).cloned())
    }
}
