//! Cursor-based walk over a subreddit listing.

use futures::Stream;
use reqwest::header::{self, HeaderMap};

use crate::api::client::HttpClient;
use crate::api::types::{ListingResponse, PostRecord};
use crate::config::SortMode;
use crate::output::EventSink;

/// Maximum posts per page accepted by the listing API.
pub const PAGE_SIZE: u32 = 100;

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub posts: Vec<PostRecord>,
    /// Cursor of the next page; `None` on the last page.
    pub after: Option<String>,
}

/// Lazily fetches listing pages, one request per call to
/// [`ListingPaginator::next_page`].
///
/// The walk ends after a page without a cursor, on a page with zero posts,
/// on a non-success status, or on a transport or decoding error. The
/// paginator knows nothing about download limits; the caller simply stops
/// asking for pages.
pub struct ListingPaginator {
    http: HttpClient,
    endpoint: String,
    page_size: u32,
    sink: EventSink,
    after: Option<String>,
    pages_fetched: u32,
    cursor_exhausted: bool,
    finished: bool,
}

impl ListingPaginator {
    pub fn new(
        http: HttpClient,
        listing_base: &str,
        subreddit: &str,
        sort: SortMode,
        page_size: u32,
        sink: EventSink,
    ) -> Self {
        Self {
            http,
            endpoint: listing_endpoint(listing_base, subreddit, sort),
            page_size: page_size.clamp(1, PAGE_SIZE),
            sink,
            after: None,
            pages_fetched: 0,
            cursor_exhausted: false,
            finished: false,
        }
    }

    /// Listing URL being walked.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of requests made so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the listing is over.
    pub async fn next_page(&mut self) -> Option<ListingPage> {
        if self.cursor_exhausted {
            self.cursor_exhausted = false;
            self.finished = true;
            self.sink.info("No more pages available.");
        }
        if self.finished {
            return None;
        }

        let mut query = vec![("limit", self.page_size.to_string())];
        if let Some(after) = &self.after {
            query.push(("after", after.clone()));
        }

        self.sink.debug(format!(
            "Fetching listing page {}: {} (after={})",
            self.pages_fetched + 1,
            self.endpoint,
            self.after.as_deref().unwrap_or("none")
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        self.pages_fetched += 1;
        let response = match self.http.get(&self.endpoint, &query, headers).await {
            Ok(response) => response,
            Err(e) => {
                self.sink.error(format!("Failed to fetch page: {}", e));
                self.finished = true;
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.sink
                .error(format!("Failed to fetch page: {}", status.as_u16()));
            self.finished = true;
            return None;
        }

        let listing: ListingResponse = match response.json().await {
            Ok(listing) => listing,
            Err(e) => {
                self.sink.error(format!("Failed to parse listing page: {}", e));
                self.finished = true;
                return None;
            }
        };

        let children = listing.data.children;
        if children.is_empty() {
            self.sink.info("No more posts found.");
            self.finished = true;
            return None;
        }

        self.sink
            .info(format!("Found {} posts to process", children.len()));

        let posts: Vec<PostRecord> = children
            .into_iter()
            .filter_map(|child| decode_post(child.data, &self.sink))
            .collect();

        let after = listing.data.after.filter(|a| !a.is_empty());
        match &after {
            Some(cursor) => self.after = Some(cursor.clone()),
            None => self.cursor_exhausted = true,
        }

        Some(ListingPage { posts, after })
    }

    /// Turn the paginator into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = ListingPage> {
        futures::stream::unfold(self, |mut paginator| async move {
            paginator.next_page().await.map(|page| (page, paginator))
        })
    }
}

/// Decode one listing child. A post with a field of unexpected type is
/// skipped and logged with its permalink.
fn decode_post(data: serde_json::Value, sink: &EventSink) -> Option<PostRecord> {
    let permalink = data
        .get("permalink")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<no permalink>")
        .to_string();

    match serde_json::from_value(data) {
        Ok(post) => Some(post),
        Err(e) => {
            sink.debug(format!("Skipping malformed post {}: {}", permalink, e));
            None
        }
    }
}

/// `{base}/r/{subreddit}/{sort}.json`.
pub fn listing_endpoint(listing_base: &str, subreddit: &str, sort: SortMode) -> String {
    format!(
        "{}/r/{}/{}.json",
        listing_base.trim_end_matches('/'),
        subreddit,
        sort.as_str()
    )
}
