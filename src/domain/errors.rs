//! # Domain Errors
//!
//! Validation errors raised by domain constructors.

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The barcode is empty or otherwise unusable as a lookup key.
    #[error("invalid barcode: {0}")]
    InvalidBarcode(String),
}

impl DomainError {
    /// Creates an invalid barcode error.
    #[must_use]
    pub fn invalid_barcode(message: impl Into<String>) -> Self {
        Self::InvalidBarcode(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
