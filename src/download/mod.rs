//! Download module.
//!
//! This module provides:
//! - The scrape engine and its three entry points
//! - The download executor with retries
//! - Retry policy
//! - Download counter and statistics

pub mod media;
pub mod retry;
pub mod scrape;
pub mod state;

pub use media::{DownloadOutcome, DownloadRequest, Downloader};
pub use retry::{AttemptFailure, RetryPolicy};
pub use scrape::{
    scrape, scrape_gifs, scrape_images, scrape_videos, spawn_scrape, ScrapeEngine, ScrapeHandle,
    ScrapeRequest, ScrapeSummary,
};
pub use state::{DownloadCounter, ScrapeStats};
