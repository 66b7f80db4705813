//! Resolution of hosted-GIF watch pages to direct media URLs.

use std::time::Duration;

use async_trait::async_trait;

use crate::api::{GifApi, GifLookup, HttpClient};
use crate::config::Config;
use crate::media::{CandidateUrl, MediaCandidate};
use crate::output::EventSink;
use crate::resolve::patterns::{extract_media_id, find_media_url, mirror_urls};
use crate::resolve::token::TokenCache;
use crate::resolve::MediaResolver;

/// Resolves watch pages by trying, in order: the authenticated API, the
/// page's own markup, then a HEAD check of known mirror URLs.
///
/// A later stage only runs when every earlier one failed. Without an ID in
/// the page URL nothing is attempted.
pub struct GifResolver {
    api: GifApi,
    http: HttpClient,
    tokens: TokenCache,
    mirror_templates: Vec<String>,
    mirror_timeout: Duration,
    sink: EventSink,
}

impl GifResolver {
    pub fn new(http: HttpClient, config: &Config, sink: EventSink) -> Self {
        Self {
            api: GifApi::new(
                http.clone(),
                &config.endpoints.gif_api_base,
                &config.endpoints.gif_site_base,
            ),
            http,
            tokens: TokenCache::new(Duration::from_secs(config.resolver.token_ttl_seconds)),
            mirror_templates: config.endpoints.mirror_templates.clone(),
            mirror_timeout: config.network.mirror_timeout(),
            sink,
        }
    }

    /// Resolve a watch page URL to a direct media URL.
    pub async fn resolve_page(&self, page_url: &str) -> Option<String> {
        let Some(id) = extract_media_id(page_url) else {
            self.sink
                .warn(format!("Failed to extract video ID from: {}", page_url));
            return None;
        };
        self.sink.debug(format!("Extracted video ID: {}", id));

        if let Some(url) = self.from_api(&id).await {
            return Some(url);
        }

        if let Some(url) = self.from_page(page_url).await {
            return Some(url);
        }

        self.from_mirrors(&id).await
    }

    /// Cached token, else one scraped from the homepage, else one from the
    /// temporary token endpoint.
    async fn token(&self) -> Option<String> {
        if let Some(token) = self.tokens.get().await {
            return Some(token);
        }

        match self.api.token_from_homepage().await {
            Ok(Some(token)) => {
                self.tokens.store(token.clone()).await;
                return Some(token);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("Homepage token lookup failed: {}", e),
        }

        self.sink.debug("Trying to get temporary OAuth token");
        match self.api.temporary_token().await {
            Ok(Some(token)) => {
                self.tokens.store(token.clone()).await;
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Temporary token request failed: {}", e);
                None
            }
        }
    }

    async fn from_api(&self, id: &str) -> Option<String> {
        let Some(token) = self.token().await else {
            self.sink
                .warn("Failed to get authentication token for the gif API");
            return None;
        };

        match self.api.lookup(id, &token).await {
            Ok(GifLookup::Found(urls)) => {
                let url = urls.best().map(str::to_string);
                if let Some(url) = &url {
                    self.sink
                        .debug(format!("Extracted video URL from API: {}", url));
                }
                url
            }
            Ok(GifLookup::NoUrls) => {
                self.sink.warn("No video URL found in API response");
                None
            }
            Ok(GifLookup::Unauthorized) => {
                self.tokens.invalidate().await;
                self.sink.warn("Gif API rejected the access token");
                None
            }
            Ok(GifLookup::Failed(status)) => {
                self.sink
                    .warn(format!("API request failed with status {}", status));
                None
            }
            Err(e) => {
                self.sink.warn(format!("Error querying gif API: {}", e));
                None
            }
        }
    }

    async fn from_page(&self, page_url: &str) -> Option<String> {
        self.sink
            .debug(format!("Trying to scrape the webpage: {}", page_url));

        match self.http.get_text(page_url, GifApi::html_headers()).await {
            Ok(Some(html)) => {
                let found = find_media_url(&html);
                match &found {
                    Some(url) => self.sink.debug(format!("Found video URL in HTML: {}", url)),
                    None => self.sink.debug("No video URL found in HTML content"),
                }
                found
            }
            Ok(None) => {
                self.sink.debug("Failed to fetch webpage");
                None
            }
            Err(e) => {
                self.sink.warn(format!("Error scraping webpage: {}", e));
                None
            }
        }
    }

    async fn from_mirrors(&self, id: &str) -> Option<String> {
        for url in mirror_urls(&self.mirror_templates, id) {
            self.sink.debug(format!("Trying direct URL: {}", url));
            if self.http.head_ok(&url, self.mirror_timeout).await {
                self.sink.debug(format!("Direct URL worked: {}", url));
                return Some(url);
            }
        }
        None
    }
}

#[async_trait]
impl MediaResolver for GifResolver {
    async fn resolve(&self, candidate: MediaCandidate) -> Option<MediaCandidate> {
        match &candidate.url {
            CandidateUrl::Direct(_) => Some(candidate),
            CandidateUrl::Page(page_url) => {
                let direct = self.resolve_page(page_url).await?;
                Some(candidate.with_direct_url(direct))
            }
        }
    }
}
