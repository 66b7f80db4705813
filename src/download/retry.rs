//! Retry policy for downloads.

use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::config::NetworkConfig;

/// How often and how patiently a URL is retried.
///
/// Every [`AttemptFailure`] uses up one attempt. A TLS verification failure
/// is not an attempt failure: the same attempt is repeated once without
/// verification (when `insecure_tls_fallback` is set) and only the outcome
/// of that repeat counts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub insecure_tls_fallback: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            insecure_tls_fallback: true,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(network: &NetworkConfig) -> Self {
        Self {
            max_attempts: network.max_attempts.max(1),
            base_delay: Duration::from_millis(network.retry_delay_ms),
            insecure_tls_fallback: network.insecure_tls_fallback,
        }
    }

    /// Whether another attempt is allowed after `failed_attempt` (1-based)
    /// failed.
    pub fn should_retry(&self, failed_attempt: u32) -> bool {
        failed_attempt < self.max_attempts
    }

    /// Delay before the attempt following `failed_attempt`: the base delay
    /// doubled per failure, plus up to 25% jitter.
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = failed_attempt.saturating_sub(1).min(6);
        let backoff = self.base_delay.saturating_mul(2u32.pow(exponent));
        let jitter_ms = u64::try_from(backoff.as_millis() / 4).unwrap_or(u64::MAX);
        let jitter = if jitter_ms > 0 {
            rand::thread_rng().gen_range(0..=jitter_ms)
        } else {
            0
        };

        backoff.saturating_add(Duration::from_millis(jitter))
    }
}

/// Why a single download attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// Response status other than 200 or 206.
    Status(u16),
    Timeout,
    /// Connection, TLS or body stream error.
    Transport(String),
    /// Local file could not be written.
    Io(String),
    /// The file was missing or empty after writing.
    EmptyFile,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Status(code) => write!(f, "status code {}", code),
            AttemptFailure::Timeout => write!(f, "timed out"),
            AttemptFailure::Transport(e) => write!(f, "network error: {}", e),
            AttemptFailure::Io(e) => write!(f, "file error: {}", e),
            AttemptFailure::EmptyFile => write!(f, "file is empty after download"),
        }
    }
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AttemptFailure::Timeout
        } else {
            AttemptFailure::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for AttemptFailure {
    fn from(err: std::io::Error) -> Self {
        AttemptFailure::Io(err.to_string())
    }
}
