//! Shared helpers for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use subreddit_scraper::config::Config;
use subreddit_scraper::output::{LogLevel, ScrapeEvent};
use tokio::sync::mpsc::UnboundedReceiver;

/// Configuration pointing every endpoint at a mock server.
pub fn test_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.scrape.subreddit = "test".to_string();
    config.scrape.limit = 2;
    config.network.retry_delay_ms = 0;
    config.network.request_timeout_seconds = 5;
    config.network.download_timeout_seconds = 5;
    config.network.mirror_timeout_seconds = 2;
    config.endpoints.listing_base = server_uri.to_string();
    config.endpoints.gif_api_base = server_uri.to_string();
    config.endpoints.gif_site_base = format!("{}/site", server_uri);
    config.endpoints.mirror_templates = vec![
        format!("{}/mirror-a/{{id}}.mp4", server_uri),
        format!("{}/mirror-b/{{id}}.mp4", server_uri),
    ];
    config
}

/// Listing body with the given post objects and cursor.
pub fn listing(posts: Vec<Value>, after: Option<&str>) -> Value {
    let children: Vec<Value> = posts
        .into_iter()
        .map(|data| json!({ "kind": "t3", "data": data }))
        .collect();
    json!({ "kind": "Listing", "data": { "children": children, "after": after } })
}

/// An image post linking straight to `url`.
pub fn image_post(url: &str, title: &str) -> Value {
    json!({
        "url": url,
        "post_hint": "image",
        "title": title,
        "permalink": "/r/test/comments/abc/post/",
        "is_video": false,
    })
}

/// A text post with no media.
pub fn text_post(title: &str) -> Value {
    json!({ "title": title, "selftext": "just words", "is_video": false })
}

/// Drain a closed event channel.
pub async fn collect_events(rx: &mut UnboundedReceiver<ScrapeEvent>) -> Vec<ScrapeEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

/// Log messages of the given level.
pub fn messages(events: &[ScrapeEvent], wanted: LogLevel) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            ScrapeEvent::Log { level, message } if *level == wanted => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Status texts in emission order.
pub fn statuses(events: &[ScrapeEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            ScrapeEvent::Status(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}
