//! Configuration module for the subreddit scraper.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Sort modes and media kinds
//! - Input validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, EndpointsConfig, NetworkConfig, ResolverConfig, ScrapeConfig};
pub use modes::{MediaKind, SortMode};
pub use validation::{normalize_subreddit, parse_limit, validate_config, validate_limit};
