//! # Product Providers
//!
//! Remote product data sources queried by the aggregation engine.
//!
//! ## Port
//!
//! - [`ProductProvider`]: fetch a product by barcode
//!
//! ## Implementations
//!
//! - [`MockProductProvider`]: single hard-wired product
//! - [`StaticCatalogProvider`]: fixed-list lookup
//! - [`HttpCatalogProvider`]: remote JSON catalog over HTTP

pub mod error;
pub mod http_catalog;
pub mod http_client;
pub mod mock;
pub mod static_catalog;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use http_catalog::HttpCatalogProvider;
pub use mock::MockProductProvider;
pub use static_catalog::StaticCatalogProvider;
pub use traits::ProductProvider;
