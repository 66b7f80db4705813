//! Configuration structures and loading logic.

use crate::config::modes::{MediaKind, SortMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// What to scrape and where to put it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Subreddit name, with or without the `r/` prefix.
    #[serde(default)]
    pub subreddit: String,

    /// Listing sort order.
    #[serde(default)]
    pub sort: SortMode,

    /// Kind of media to collect.
    #[serde(default)]
    pub media_kind: MediaKind,

    /// Maximum number of files to download.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Custom base directory. When unset, `reddit_downloads/<subreddit>` in
    /// the working directory is used.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Name files after post titles for every media kind, not only
    /// third-party GIFs.
    #[serde(default)]
    pub title_filenames: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            subreddit: String::new(),
            sort: SortMode::default(),
            media_kind: MediaKind::default(),
            limit: default_limit(),
            download_directory: None,
            title_filenames: false,
        }
    }
}

/// HTTP behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for listing, API and HTML requests.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Timeout for a single download attempt.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_seconds: u64,

    /// Timeout for mirror existence checks.
    #[serde(default = "default_mirror_timeout")]
    pub mirror_timeout_seconds: u64,

    /// Download attempts per URL.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay before a retry; doubled on each further attempt.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Posts requested per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry a download once without certificate verification when TLS
    /// verification fails.
    #[serde(default = "default_true")]
    pub insecure_tls_fallback: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_seconds: default_request_timeout(),
            download_timeout_seconds: default_download_timeout(),
            mirror_timeout_seconds: default_mirror_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay(),
            page_size: default_page_size(),
            insecure_tls_fallback: true,
        }
    }
}

impl NetworkConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    pub fn mirror_timeout(&self) -> Duration {
        Duration::from_secs(self.mirror_timeout_seconds)
    }
}

/// Remote endpoints. Overridable so the scraper can be pointed at mirrors or
/// test servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Base URL of the listing API.
    #[serde(default = "default_listing_base")]
    pub listing_base: String,

    /// Base URL of the third-party GIF API.
    #[serde(default = "default_gif_api_base")]
    pub gif_api_base: String,

    /// Homepage of the third-party GIF site, scraped for access tokens.
    #[serde(default = "default_gif_site_base")]
    pub gif_site_base: String,

    /// Direct media URL templates checked as a last resort. `{id}` is
    /// replaced with the media ID.
    #[serde(default = "default_mirror_templates")]
    pub mirror_templates: Vec<String>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            listing_base: default_listing_base(),
            gif_api_base: default_gif_api_base(),
            gif_site_base: default_gif_site_base(),
            mirror_templates: default_mirror_templates(),
        }
    }
}

/// Third-party resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How long an API token is reused across posts. Zero fetches a fresh
    /// token for every resolution.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

fn default_limit() -> u32 {
    50
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    30
}

fn default_mirror_timeout() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_page_size() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_listing_base() -> String {
    "https://www.reddit.com".to_string()
}

fn default_gif_api_base() -> String {
    "https://api.redgifs.com".to_string()
}

fn default_gif_site_base() -> String {
    "https://www.redgifs.com".to_string()
}

fn default_mirror_templates() -> Vec<String> {
    [
        "https://thumbs.redgifs.com/{id}.mp4",
        "https://thumbs1.redgifs.com/{id}.mp4",
        "https://thumbs2.redgifs.com/{id}.mp4",
        "https://thumbs3.redgifs.com/{id}.mp4",
        "https://thumbs4.redgifs.com/{id}.mp4",
        "https://thumbs5.redgifs.com/{id}.mp4",
        "https://thumbs.redgifs.com/{id}-mobile.mp4",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_token_ttl() -> u64 {
    600
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective parent download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.scrape
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scrape.limit, 50);
        assert_eq!(config.scrape.sort, SortMode::Hot);
        assert_eq!(config.network.max_attempts, 3);
        assert_eq!(config.network.page_size, 100);
        assert_eq!(config.endpoints.mirror_templates.len(), 7);
        assert!(config.network.insecure_tls_fallback);
    }

    #[test]
    fn test_partial_sections_parse() {
        let config: Config = toml::from_str(
            r#"
            [scrape]
            subreddit = "pics"
            sort = "top"
            media_kind = "third-party-gifs"
            limit = 5

            [network]
            max_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.scrape.subreddit, "pics");
        assert_eq!(config.scrape.sort, SortMode::Top);
        assert_eq!(config.scrape.media_kind, MediaKind::ThirdPartyGifs);
        assert_eq!(config.scrape.limit, 5);
        assert_eq!(config.network.max_attempts, 5);
        assert_eq!(config.network.download_timeout_seconds, 30);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
