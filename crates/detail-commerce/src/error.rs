//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Price string could not be read as an amount.
    #[error("Invalid price {input:?}: {reason}")]
    InvalidPrice { input: String, reason: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<detail_cache::CacheError> for CommerceError {
    fn from(e: detail_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
