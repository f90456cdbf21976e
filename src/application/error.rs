//! # Application Errors
//!
//! Errors that cross the aggregation engine boundary.
//!
//! # Error Hierarchy
//!
//! ```text
//! LookupError
//! ├── NoProviders        - Configuration error, no I/O attempted
//! ├── NotFound           - Every provider finished without a product
//! ├── DeadlineExceeded   - The bounded wait elapsed with nothing collected
//! ├── Cancelled          - The caller cancelled with nothing collected
//! └── Cache(CacheError)  - Cache delete failed
//! ```
//!
//! Provider failures and cache read/write-back failures are absorbed by the
//! engine and never surface here.
//!
//! # Examples
//!
//! ```
//! use getproduct::application::error::LookupError;
//!
//! let err = LookupError::not_found("111");
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "product by barcode 111 not found");
//! ```

use crate::infrastructure::cache::CacheError;
use thiserror::Error;

/// Error type for engine lookup operations.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// No product providers are registered.
    #[error("product providers is empty")]
    NoProviders,

    /// Fan-out finished with zero usable results.
    #[error("product by barcode {barcode} not found")]
    NotFound {
        /// The barcode that was looked up.
        barcode: String,
    },

    /// The lookup deadline elapsed before any product arrived.
    #[error("lookup of barcode {barcode} exceeded its deadline")]
    DeadlineExceeded {
        /// The barcode that was looked up.
        barcode: String,
    },

    /// The caller cancelled the lookup before any product arrived.
    #[error("lookup of barcode {barcode} was cancelled")]
    Cancelled {
        /// The barcode that was looked up.
        barcode: String,
    },

    /// The local cache rejected an operation.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl LookupError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(barcode: impl Into<String>) -> Self {
        Self::NotFound {
            barcode: barcode.into(),
        }
    }

    /// Creates a deadline exceeded error.
    #[must_use]
    pub fn deadline_exceeded(barcode: impl Into<String>) -> Self {
        Self::DeadlineExceeded {
            barcode: barcode.into(),
        }
    }

    /// Creates a cancelled error.
    #[must_use]
    pub fn cancelled(barcode: impl Into<String>) -> Self {
        Self::Cancelled {
            barcode: barcode.into(),
        }
    }

    /// Returns true for the not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for the deadline error.
    #[must_use]
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }

    /// Returns true for the configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoProviders)
    }
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
