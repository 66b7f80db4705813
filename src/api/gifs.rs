//! Client for the third-party GIF host's API and homepage.

use reqwest::header;

use crate::api::client::{header_map, snippet, HttpClient};
use crate::api::types::{GifResponse, GifUrls, TokenResponse};
use crate::error::{Error, Result};
use crate::resolve::patterns::find_access_token;

/// Accept header used for HTML page requests.
pub const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml";

/// Accept-Language header used for HTML page requests.
pub const HTML_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Outcome of a metadata lookup.
#[derive(Debug)]
pub enum GifLookup {
    Found(GifUrls),
    /// The API answered but listed no renditions.
    NoUrls,
    /// The token was rejected.
    Unauthorized,
    /// Any other non-success status.
    Failed(u16),
}

/// Third-party GIF API client.
pub struct GifApi {
    http: HttpClient,
    api_base: String,
    site_base: String,
}

impl GifApi {
    pub fn new(http: HttpClient, api_base: &str, site_base: &str) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            site_base: site_base.trim_end_matches('/').to_string(),
        }
    }

    /// Headers for HTML page requests.
    pub fn html_headers() -> header::HeaderMap {
        header_map(&[
            (header::ACCEPT, HTML_ACCEPT.to_string()),
            (header::ACCEPT_LANGUAGE, HTML_ACCEPT_LANGUAGE.to_string()),
        ])
    }

    /// Scrape an access token from the site homepage markup.
    pub async fn token_from_homepage(&self) -> Result<Option<String>> {
        let url = format!("{}/", self.site_base);
        let html = self.http.get_text(&url, Self::html_headers()).await?;
        Ok(html.as_deref().and_then(find_access_token))
    }

    /// Request a temporary token from the token endpoint.
    pub async fn temporary_token(&self) -> Result<Option<String>> {
        let url = format!("{}/v2/auth/temporary", self.api_base);
        let response = self.http.get(&url, &[], Self::html_headers()).await?;

        if !response.status().is_success() {
            tracing::debug!("Temporary token request failed: {}", response.status());
            return Ok(None);
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.token.filter(|t| !t.is_empty()))
    }

    /// Look up the renditions of a GIF by ID.
    pub async fn lookup(&self, id: &str, token: &str) -> Result<GifLookup> {
        let url = format!("{}/v2/gifs/{}", self.api_base, id);
        let headers = header_map(&[
            (header::REFERER, format!("{}/", self.site_base)),
            (header::ACCEPT, "application/json".to_string()),
            (header::ORIGIN, self.site_base.clone()),
            (header::AUTHORIZATION, format!("Bearer {}", token)),
        ]);

        let response = self.http.get(&url, &[], headers).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(GifLookup::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                "Gif lookup failed: HTTP {} - {}",
                status,
                snippet(&body, 200)
            );
            return Ok(GifLookup::Failed(status.as_u16()));
        }

        let text = response.text().await?;
        let parsed: GifResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse gif response: {} - Response: {}",
                e,
                snippet(&text, 200)
            ))
        })?;

        match parsed.gif {
            Some(gif) if gif.urls.best().is_some() => Ok(GifLookup::Found(gif.urls)),
            _ => Ok(GifLookup::NoUrls),
        }
    }
}
