//! # Domain Layer
//!
//! Core types of the product lookup domain.
//!
//! - [`entities`]: the [`Product`](entities::Product) record
//! - [`value_objects`]: validated scalar types such as [`Barcode`](value_objects::Barcode)
//! - [`errors`]: validation failures raised while constructing domain types

pub mod entities;
pub mod errors;
pub mod value_objects;
