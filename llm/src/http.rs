//! Shared JSON-over-HTTP transport for the provider families.
//!
//! `HttpProvider` holds pre-built headers (auth + content type), the target
//! endpoint URL and the per-call timeout. The `reqwest::Client` is passed
//! per call so each family decides how connections are pooled.

use crate::{Error, Result};
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use std::time::Duration;

/// Wire-level budget for a single chat completion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Endpoint, headers and timeout of one upstream API.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    headers: HeaderMap,
    endpoint: String,
    timeout: Duration,
}

impl HttpProvider {
    /// Create a transport with Bearer token authentication.
    pub fn bearer(key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(provider)
    }

    /// Create a transport without authentication (e.g. Ollama).
    pub fn no_auth(endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            headers,
            endpoint: endpoint.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a transport authenticated by a custom header.
    ///
    /// Used by providers that don't use Bearer tokens (e.g. Anthropic
    /// uses `x-api-key`).
    pub fn custom_header(header_name: &str, header_value: &str, endpoint: &str) -> Result<Self> {
        Self::no_auth(endpoint).with_header(header_name, header_value)
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers
            .insert(name.parse::<HeaderName>()?, value.parse::<HeaderValue>()?);
        Ok(self)
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST `body` as JSON and return the raw response text.
    ///
    /// A non-2xx status becomes [`Error::Http`] carrying the upstream
    /// status and body; nothing is retried.
    pub async fn send(&self, client: &Client, body: &impl Serialize) -> Result<String> {
        tracing::trace!("request: {}", serde_json::to_string(body)?);
        let response = client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("response ({status}): {text}");
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
