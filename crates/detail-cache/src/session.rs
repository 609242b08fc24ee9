//! Stored sign-in session.
//!
//! The token and the user live under separate keys, as the storefront web
//! client keeps them; the remembered email lives under its own key and
//! survives logout.

use crate::{Cache, CacheError};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;

/// Bearer token key.
pub const TOKEN_KEY: &str = "dg-auth-token";
/// Signed-in user key.
pub const USER_KEY: &str = "dg-user";
/// Remembered login email key.
pub const REMEMBER_EMAIL_KEY: &str = "dg-remember-email";

/// A restored session: token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession<U> {
    pub token: String,
    pub user: U,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct StoredUser<U> {
    user: U,
    signed_in_at: DateTime<Utc>,
}

/// Session persistence over a [`Cache`].
///
/// Generic over the user type `U`.
pub struct SessionStore<U> {
    cache: Cache,
    _phantom: PhantomData<fn() -> U>,
}

impl<U> Clone for SessionStore<U> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<U> SessionStore<U>
where
    U: Serialize + DeserializeOwned,
{
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            _phantom: PhantomData,
        }
    }

    /// Restore the session saved by a previous run.
    ///
    /// A half-written session (token without user or the reverse) or one
    /// that no longer deserializes is cleared and reported as absent.
    pub fn restore(&self) -> Result<Option<StoredSession<U>>, CacheError> {
        let token = self.cache.get::<String>(TOKEN_KEY);
        let user = self.cache.get::<StoredUser<U>>(USER_KEY);

        match (token, user) {
            (Ok(Some(token)), Ok(Some(stored))) => Ok(Some(StoredSession {
                token,
                user: stored.user,
                signed_in_at: stored.signed_in_at,
            })),
            (Ok(None), Ok(None)) => Ok(None),
            (Err(CacheError::StoreError(e)), _) | (_, Err(CacheError::StoreError(e))) => {
                Err(CacheError::StoreError(e))
            }
            _ => {
                tracing::warn!("discarding incomplete or unreadable stored session");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Result<Option<String>, CacheError> {
        self.cache.get(TOKEN_KEY)
    }

    /// Persist a successful login.
    pub fn store_login(&self, token: &str, user: &U) -> Result<(), CacheError> {
        self.cache.set(TOKEN_KEY, &token)?;
        self.cache.set(
            USER_KEY,
            &StoredUser {
                user,
                signed_in_at: Utc::now(),
            },
        )
    }

    /// Replace the token after a refresh, keeping the stored user.
    pub fn replace_token(&self, token: &str) -> Result<(), CacheError> {
        self.cache.set(TOKEN_KEY, &token)
    }

    /// Remove token and user. The remembered email is kept.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(TOKEN_KEY)?;
        self.cache.delete(USER_KEY)
    }

    pub fn remembered_email(&self) -> Result<Option<String>, CacheError> {
        self.cache.get(REMEMBER_EMAIL_KEY)
    }

    /// Remember an email for the next login, or forget it with `None`.
    pub fn remember_email(&self, email: Option<&str>) -> Result<(), CacheError> {
        match email {
            Some(email) => self.cache.set(REMEMBER_EMAIL_KEY, &email),
            None => self.cache.delete(REMEMBER_EMAIL_KEY),
        }
    }
}
