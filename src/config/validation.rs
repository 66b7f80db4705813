//! Input validation, performed before any network activity.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Subreddit names: letters, digits and underscores.
static SUBREDDIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{2,21}$").unwrap());

/// Maximum posts the listing API returns per page.
const MAX_PAGE_SIZE: u32 = 100;

/// Upper bound for every network timeout, in seconds.
const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Upper bound for the base retry delay, in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 10 * 60 * 1000;

/// Upper bound for the token cache lifetime, in seconds.
const MAX_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    normalize_subreddit(&config.scrape.subreddit)?;
    validate_limit(config.scrape.limit as i64)?;

    if config.network.page_size == 0 || config.network.page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, config.network.page_size
            ),
        });
    }

    if config.network.max_attempts == 0 {
        return Err(Error::ConfigValidation {
            field: "max_attempts".to_string(),
            message: "At least one download attempt is required".to_string(),
        });
    }

    if config.network.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    let network = &config.network;
    check_range(
        "request_timeout_seconds",
        network.request_timeout_seconds,
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    check_range(
        "download_timeout_seconds",
        network.download_timeout_seconds,
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    check_range(
        "mirror_timeout_seconds",
        network.mirror_timeout_seconds,
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    check_range("retry_delay_ms", network.retry_delay_ms, 0, MAX_RETRY_DELAY_MS)?;
    check_range(
        "token_ttl_seconds",
        config.resolver.token_ttl_seconds,
        0,
        MAX_TOKEN_TTL_SECONDS,
    )?;

    Ok(())
}

fn check_range(field: &str, value: u64, min: u64, max: u64) -> Result<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Must be between {} and {} (got {})", min, max, value),
    })
}

/// Validate a subreddit name and return it without any `r/` prefix.
pub fn normalize_subreddit(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let name = trimmed
        .strip_prefix("/r/")
        .or_else(|| trimmed.strip_prefix("r/"))
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    if name.is_empty() {
        return Err(Error::ConfigValidation {
            field: "subreddit".to_string(),
            message: "Please enter a subreddit name".to_string(),
        });
    }

    if !SUBREDDIT_PATTERN.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "subreddit".to_string(),
            message: format!(
                "Subreddit '{}' is invalid. Use 2-21 letters, digits or underscores.",
                name
            ),
        });
    }

    Ok(name.to_string())
}

/// Validate a download limit.
pub fn validate_limit(limit: i64) -> Result<u32> {
    if limit <= 0 {
        return Err(Error::ConfigValidation {
            field: "limit".to_string(),
            message: "Download limit must be a positive number".to_string(),
        });
    }

    u32::try_from(limit).map_err(|_| Error::ConfigValidation {
        field: "limit".to_string(),
        message: format!("Download limit is too large (got {})", limit),
    })
}

/// Parse a download limit typed as free text.
pub fn parse_limit(input: &str) -> Result<u32> {
    let value: i64 = input.trim().parse().map_err(|_| Error::ConfigValidation {
        field: "limit".to_string(),
        message: "Download limit must be a number".to_string(),
    })?;

    validate_limit(value)
}
