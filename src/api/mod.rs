//! Remote API module.
//!
//! This module provides:
//! - HTTP client with TLS fallback and streaming
//! - Subreddit listing pagination
//! - Third-party GIF API client
//! - API response types

pub mod client;
pub mod gifs;
pub mod listing;
pub mod types;

pub use client::{HttpClient, StreamResponse, TrustLevel};
pub use gifs::{GifApi, GifLookup};
pub use listing::{ListingPage, ListingPaginator, PAGE_SIZE};
pub use types::*;
