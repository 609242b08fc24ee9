//! Authentication errors.

use crate::forms::FormErrors;
use detail_data::FetchError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The form failed local validation; nothing was sent.
    #[error("invalid form: {0}")]
    Validation(FormErrors),

    /// The backend rejected the email/password pair.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The stored token was rejected. The local session has been cleared.
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// The operation needs a signed-in customer.
    #[error("not signed in")]
    NotSignedIn,

    /// The backend answered 2xx with a body we could not use.
    #[error("unexpected auth response: {0}")]
    InvalidResponse(String),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] detail_cache::CacheError),

    /// Request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials(_) | AuthError::SessionExpired | AuthError::NotSignedIn
        )
    }
}
