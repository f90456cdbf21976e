//! # API Layer
//!
//! External interfaces of the lookup service.
//!
//! - [`rest`]: HTTP/JSON endpoints served with axum

pub mod rest;
