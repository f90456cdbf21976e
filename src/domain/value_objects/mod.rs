//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Barcode`]: the product lookup key

pub mod barcode;

pub use barcode::Barcode;
