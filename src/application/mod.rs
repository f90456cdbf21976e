//! # Application Layer
//!
//! Lookup use cases built on top of the domain and infrastructure layers.
//!
//! - [`services`]: the aggregation engine and its collaborators
//! - [`error`]: errors returned by lookup operations

pub mod error;
pub mod services;

pub use error::{LookupError, LookupResult};
