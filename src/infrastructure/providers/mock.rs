//! # Mock Product Provider
//!
//! A provider with a single hard-wired product, used for local runs and
//! smoke tests.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::ProductProvider;
use async_trait::async_trait;
use std::time::Duration;

/// Barcode the mock provider knows about.
pub const MOCK_BARCODE: &str = "111";

/// Provider that knows exactly one product, [`MOCK_BARCODE`].
///
/// Any other barcode yields `ProviderError::NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockProductProvider {
    delay: Option<Duration>,
}

impl MockProductProvider {
    /// Creates a mock provider that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: delay every answer by `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn product(barcode: &Barcode) -> Product {
        Product::new(
            barcode.clone(),
            "TestProduct",
            "pcs",
            "TestDescription",
            "TestM",
        )
    }
}

#[async_trait]
impl ProductProvider for MockProductProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        _ctx: &LookupContext,
        barcode: &Barcode,
    ) -> ProviderResult<Option<Product>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if barcode.as_str() == MOCK_BARCODE {
            return Ok(Some(Self::product(barcode)));
        }

        Err(ProviderError::not_found(barcode.as_str()))
    }
}
