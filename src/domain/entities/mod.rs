//! # Domain Entities
//!
//! - [`Product`]: product record resolved by barcode

pub mod product;

pub use product::{Product, ProductBuilder};
