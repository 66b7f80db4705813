//! Short-lived cache for the third-party API token.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Token plus the moment it stops being reused. `None` never expires.
#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Option<Instant>,
}

/// Keeps a bearer token for `ttl`. A zero TTL disables caching, so every
/// resolution fetches a fresh token.
#[derive(Debug)]
pub struct TokenCache {
    ttl: Duration,
    token: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            token: RwLock::new(None),
        }
    }

    /// The cached token, if still fresh.
    pub async fn get(&self) -> Option<String> {
        let token = self.token.read().await;
        token
            .as_ref()
            .filter(|t| t.expires_at.map_or(true, |at| at > Instant::now()))
            .map(|t| t.value.clone())
    }

    /// Remember a freshly fetched token.
    pub async fn store(&self, value: String) {
        if self.ttl.is_zero() {
            return;
        }
        let mut token = self.token.write().await;
        *token = Some(CachedToken {
            value,
            expires_at: Instant::now().checked_add(self.ttl),
        });
    }

    /// Forget the token, e.g. after the API rejected it.
    pub async fn invalidate(&self) {
        let mut token = self.token.write().await;
        *token = None;
    }
}
