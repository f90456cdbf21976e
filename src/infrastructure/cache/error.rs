//! # Cache Errors
//!
//! Error types for local product cache operations.

use crate::context::Interrupted;
use thiserror::Error;

/// Error type for product cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The cache backend could not be reached.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// A cached value could not be encoded or decoded.
    #[error("cache serialization error: {0}")]
    Serialization(String),

    /// The backend rejected or failed the command.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// The lookup context ended before the command completed.
    #[error("cache operation interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

impl CacheError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
