//! HTTP client shared by the listing walker, the resolver and the
//! downloader.

use std::time::Duration;

use reqwest::{header, Client, Response};

use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Whether a response was obtained with certificate verification enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLevel {
    Verified,
    Unverified,
}

/// A streaming response and how it was obtained.
pub struct StreamResponse {
    pub response: Response,
    pub trust: TrustLevel,
}

/// HTTP client with a verified and an unverified TLS configuration.
///
/// The unverified client is only used by [`HttpClient::get_stream`] after a
/// certificate failure, and only when the caller allows it.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    insecure_client: Client,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new client from network settings.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&network.user_agent)
            .cookie_store(true)
            .connect_timeout(network.request_timeout())
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let insecure_client = Client::builder()
            .user_agent(&network.user_agent)
            .cookie_store(true)
            .connect_timeout(network.request_timeout())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            insecure_client,
            request_timeout: network.request_timeout(),
        })
    }

    /// Make a GET request. The status is not checked.
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: header::HeaderMap,
    ) -> Result<Response> {
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .headers(headers)
            .timeout(self.request_timeout)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }

    /// Fetch a page as text. Returns `None` for a non-success status.
    pub async fn get_text(&self, url: &str, headers: header::HeaderMap) -> Result<Option<String>> {
        let response = self.get(url, &[], headers).await?;
        if !response.status().is_success() {
            tracing::debug!("GET {} failed with status {}", url, response.status());
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }

    /// Check whether a URL exists with a HEAD request.
    pub async fn head_ok(&self, url: &str, timeout: Duration) -> bool {
        tracing::debug!("HEAD {}", url);

        match self.client.head(url).timeout(timeout).send().await {
            Ok(response) => {
                tracing::debug!("HEAD {} -> {}", url, response.status());
                response.status().is_success()
            }
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", url, e);
                false
            }
        }
    }

    /// Start a streaming GET for a download.
    ///
    /// No overall deadline is set; the caller bounds idle time per read.
    /// On a certificate verification failure the request is repeated once
    /// without verification when `allow_insecure` is set.
    pub async fn get_stream(
        &self,
        url: &str,
        headers: header::HeaderMap,
        allow_insecure: bool,
    ) -> Result<StreamResponse> {
        tracing::debug!("GET (stream) {}", url);

        let secure = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await;

        match secure {
            Ok(response) => Ok(StreamResponse {
                response,
                trust: TrustLevel::Verified,
            }),
            Err(e) if allow_insecure && is_certificate_error(&e) => {
                tracing::warn!("TLS verification failed for {}: {}", url, e);
                let response = self
                    .insecure_client
                    .get(url)
                    .headers(headers)
                    .send()
                    .await?;
                Ok(StreamResponse {
                    response,
                    trust: TrustLevel::Unverified,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Whether a request failed because the server certificate was rejected.
pub fn is_certificate_error(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        let text = e.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("unknownissuer") {
            return true;
        }
        source = e.source();
    }
    false
}

/// Build a header map from static names and owned values, skipping values
/// that are not valid header text.
pub fn header_map(pairs: &[(header::HeaderName, String)]) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    for (name, value) in pairs {
        match header::HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(name.clone(), value);
            }
            Err(_) => tracing::debug!("Skipping invalid header value for {}", name),
        }
    }
    headers
}

/// Leading part of a response body for log messages, cut on a character
/// boundary.
pub fn snippet(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
