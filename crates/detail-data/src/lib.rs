//! HTTP client utilities for the DetailGreek storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`] with JSON
//! handling, a total timeout around every request, bearer credentials read
//! per request, and classification of failures into [`FetchError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use detail_data::{FetchClient, ReqwestTransport, TimeoutConfig};
//!
//! let timeouts = TimeoutConfig::from_millis(10_000);
//! let client = FetchClient::new(ReqwestTransport::new(timeouts)?)
//!     .with_base_url("http://localhost:9090/api")
//!     .with_timeout(timeouts.total);
//!
//! let products: Vec<serde_json::Value> = client.get("/products").send().await?.json()?;
//! ```

mod error;
mod request;
mod response;
mod timeout;
mod transport;

pub use error::{FailureKind, FetchError};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use timeout::TimeoutConfig;
pub use transport::{ReqwestTransport, Transport};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Source of the bearer token attached to requests.
///
/// Read on every request so a login or logout takes effect immediately.
/// `invalidate` is called when the server answers 401.
pub trait Credentials: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
    fn invalidate(&self);
}

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    timeout: Duration,
    credentials: Option<Arc<dyn Credentials>>,
}

impl FetchClient {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Create a client over an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
            timeout: TimeoutConfig::default().total,
            credentials: None,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Fail requests that take longer than `timeout` end to end.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach bearer credentials to every request.
    pub fn with_credentials(mut self, credentials: Arc<dyn Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Patch, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder: Ok(builder),
        }
    }

    async fn execute(&self, mut request: RequestBuilder) -> Result<Response, FetchError> {
        if request.header_value("Authorization").is_none() {
            if let Some(token) = self.credentials.as_ref().and_then(|c| c.bearer_token()) {
                request = request.bearer_auth(token);
            }
        }

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = match tokio::time::timeout(self.timeout, self.transport.send(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        };

        let result = response.and_then(Response::error_for_status);
        match &result {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "request succeeded");
            }
            Err(FetchError::Unauthorized { message }) => {
                tracing::warn!(%method, %url, %message, "unauthorized, clearing session");
                if let Some(credentials) = &self.credentials {
                    credentials.invalidate();
                }
            }
            Err(FetchError::Server { status, message }) => {
                tracing::error!(%method, %url, status, %message, "server error");
            }
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "request failed");
            }
        }
        result
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: Result<RequestBuilder, FetchError>,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.map(|b| b.header(key, value));
        self
    }

    /// Set the request body as JSON. Encoding errors surface from `send`.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.and_then(|b| b.json(value));
        self
    }

    /// Add a bearer token authorization header, overriding stored credentials.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.map(|b| b.bearer_auth(token));
        self
    }

    /// Send the request. Non-2xx statuses come back as errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.execute(self.builder?).await
    }

    /// Send the request and parse a JSON body.
    pub async fn send_json<T: serde::de::DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.json()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Credentials, FetchClient, FetchError, Method, Response, Transport};
}
