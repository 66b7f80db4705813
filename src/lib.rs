//! Subreddit media scraper
//!
//! This library downloads media posted to a subreddit: images, Reddit-hosted
//! videos and GIFs hosted on third-party embed sites.
//!
//! # Features
//!
//! - Cursor-based listing pagination with every sort order
//! - One scrape engine parameterized by an extractor and a resolver
//! - Third-party GIF resolution: API with cached token, page scraping, mirrors
//! - Retries with backoff and a certificate verification fallback
//! - Downloads written to part files and verified before they are counted
//! - Events reported through an injected sink instead of stdout
//!
//! # Example
//!
//! ```no_run
//! use subreddit_scraper::{scrape_images, Config, EventSink, ScrapeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.scrape.subreddit = "pics".to_string();
//!     config.scrape.limit = 10;
//!
//!     let request = ScrapeRequest::from_config(&config)?;
//!     let summary = scrape_images(&config, &request, &EventSink::tracing_only()).await?;
//!     println!("downloaded {}", summary.downloaded);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod resolve;

// Re-exports for convenience
pub use config::{Config, MediaKind, SortMode};
pub use download::{
    scrape, scrape_gifs, scrape_images, scrape_videos, spawn_scrape, ScrapeEngine, ScrapeHandle,
    ScrapeRequest, ScrapeSummary,
};
pub use error::{Error, Result};
pub use media::{MediaCandidate, MediaExtractor};
pub use output::{EventSink, ScrapeEvent};
pub use resolve::MediaResolver;
