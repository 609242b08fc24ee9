//! Customer session against the storefront backend.

use crate::forms::{LoginForm, SignupForm};
use crate::token::AuthResponse;
use crate::user::{Profile, User};
use crate::AuthError;
use detail_cache::{Cache, SessionStore, StoredSession};
use detail_data::{Credentials, FetchClient, FetchError};
use std::sync::Arc;

/// Reads the bearer token from the session store for every request and
/// clears the session when the backend answers 401.
struct StoredCredentials {
    store: SessionStore<Profile>,
}

impl Credentials for StoredCredentials {
    fn bearer_token(&self) -> Option<String> {
        match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored token");
                None
            }
        }
    }

    fn invalidate(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "failed to clear session after 401");
        }
    }
}

/// Sign-in state backed by a [`Cache`] and the auth endpoints.
///
/// The client handed out by [`AuthSession::client`] carries the session's
/// credentials, so a 401 from any endpoint signs the customer out.
#[derive(Clone)]
pub struct AuthSession {
    client: FetchClient,
    store: SessionStore<Profile>,
}

impl AuthSession {
    pub fn new(client: FetchClient, cache: Cache) -> Self {
        let store = SessionStore::new(cache);
        let credentials = Arc::new(StoredCredentials {
            store: store.clone(),
        });
        Self {
            client: client.with_credentials(credentials),
            store,
        }
    }

    /// Client that authenticates as the current customer.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Profile, AuthError> {
        form.validate().map_err(AuthError::Validation)?;

        let response: AuthResponse = self
            .client
            .post("/auth/login")
            .json(form)
            .send_json()
            .await
            .map_err(|e| match e {
                FetchError::Unauthorized { message } => AuthError::InvalidCredentials(message),
                other => AuthError::Fetch(other),
            })?;

        let (token, profile) = response
            .into_login()
            .ok_or_else(|| AuthError::InvalidResponse("login without token or user".into()))?;

        self.store.store_login(&token, &profile)?;
        self.store
            .remember_email(form.remember.then_some(form.email.as_str()))?;

        tracing::info!(user_id = %profile.id, "signed in");
        Ok(profile)
    }

    /// Create an account. Returns the profile when the backend signs the new
    /// customer in directly.
    pub async fn register(&self, form: &SignupForm) -> Result<Option<Profile>, AuthError> {
        form.validate().map_err(AuthError::Validation)?;

        let response: AuthResponse = self
            .client
            .post("/auth/register")
            .json(form)
            .send_json()
            .await?;

        tracing::info!(email = %form.email, "registered");
        match response.into_login() {
            Some((token, profile)) => {
                self.store.store_login(&token, &profile)?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Sign out. The local session is cleared even when the backend call
    /// fails; that failure is only logged.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if self.store.token()?.is_some() {
            if let Err(e) = self.client.post("/auth/logout").send().await {
                tracing::warn!(error = %e, "logout request failed, clearing local session");
            }
        }
        self.store.clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Ask the backend whether the stored token is still good.
    ///
    /// `Ok(false)` when there is no token or the backend rejected it; in the
    /// latter case the session is already cleared.
    pub async fn verify(&self) -> Result<bool, AuthError> {
        if self.store.token()?.is_none() {
            return Ok(false);
        }
        match self.client.get("/auth/verify").send().await {
            Ok(_) => Ok(true),
            Err(FetchError::Unauthorized { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Exchange the stored token for a fresh one.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        if self.store.token()?.is_none() {
            return Err(AuthError::NotSignedIn);
        }

        let response: AuthResponse = self
            .client
            .post("/auth/refresh")
            .send_json()
            .await
            .map_err(|e| match e {
                FetchError::Unauthorized { .. } => AuthError::SessionExpired,
                other => AuthError::Fetch(other),
            })?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("refresh without token".into()))?;
        self.store.replace_token(&token)?;
        tracing::debug!("token refreshed");
        Ok(())
    }

    /// The saved session with its sign-in time, if any.
    pub fn stored_session(&self) -> Result<Option<StoredSession<Profile>>, AuthError> {
        Ok(self.store.restore()?)
    }

    pub fn current_user(&self) -> Result<User, AuthError> {
        Ok(match self.store.restore()? {
            Some(session) => User::Authenticated(session.user),
            None => User::Anonymous,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        match self.store.restore() {
            Ok(session) => session.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session");
                false
            }
        }
    }

    pub fn remembered_email(&self) -> Result<Option<String>, AuthError> {
        Ok(self.store.remembered_email()?)
    }

    /// Drop the local session without calling the backend.
    pub fn invalidate(&self) -> Result<(), AuthError> {
        Ok(self.store.clear()?)
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("client", &self.client)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
