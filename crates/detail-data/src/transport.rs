//! Transports that carry a request to the network and back.

use crate::{FetchError, RequestBuilder, Response, TimeoutConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Sends one request and returns the raw response.
///
/// Status codes are not interpreted here; [`FetchClient`](crate::FetchClient)
/// classifies them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport over a shared [`reqwest::Client`].
///
/// Only the connect timeout is enforced here; the total timeout is applied
/// by the client around the whole exchange.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    connect_timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .user_agent(concat!("detail-storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            connect_timeout: timeouts.connect,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", request.url)))?;

        let method = match request.method {
            crate::Method::Get => reqwest::Method::GET,
            crate::Method::Post => reqwest::Method::POST,
            crate::Method::Put => reqwest::Method::PUT,
            crate::Method::Patch => reqwest::Method::PATCH,
            crate::Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(self.connect_timeout)
            } else if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Network(e.to_string())
            }
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
