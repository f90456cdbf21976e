//! # HTTP Catalog Provider
//!
//! Product provider backed by a JSON catalog service.
//!
//! The provider requests `GET {base_url}/{barcode}` and expects a JSON object
//! with optional `name`, `unit`, `description` and `manufacturer` fields.
//! A `404` answer means the catalog does not know the barcode.

use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::traits::ProductProvider;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Catalog record as returned by the remote service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRecord {
    name: String,
    unit: String,
    description: String,
    manufacturer: String,
}

impl CatalogRecord {
    fn into_product(self, barcode: &Barcode) -> Product {
        Product::new(
            barcode.clone(),
            self.name,
            self.unit,
            self.description,
            self.manufacturer,
        )
    }
}

/// Provider that looks products up in a remote JSON catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogProvider {
    name: String,
    base_url: Url,
    client: HttpClient,
}

impl HttpCatalogProvider {
    /// Creates a provider for the catalog at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if `base_url` is not an absolute
    /// hierarchical URL or the HTTP client cannot be created.
    pub fn new(name: impl Into<String>, base_url: &str, timeout_ms: u64) -> ProviderResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::internal(format!("invalid catalog url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::internal(format!(
                "catalog url {base_url} cannot be a base"
            )));
        }

        Ok(Self {
            name: name.into(),
            base_url,
            client: HttpClient::new(timeout_ms)?,
        })
    }

    /// Returns the catalog base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn product_url(&self, barcode: &Barcode) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::internal("catalog url cannot be a base"))?
            .pop_if_empty()
            .push(barcode.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ProductProvider for HttpCatalogProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        ctx: &LookupContext,
        barcode: &Barcode,
    ) -> ProviderResult<Option<Product>> {
        let url = self.product_url(barcode)?;
        debug!(provider = %self.name, %url, "requesting catalog record");

        let record: Option<CatalogRecord> = self.client.get_optional(url, ctx.remaining()).await?;
        Ok(record.map(|record| record.into_product(barcode)))
    }
}
