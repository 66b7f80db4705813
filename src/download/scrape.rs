//! The scrape engine: walks a listing, extracts and resolves media, and
//! downloads it until the limit is reached.

use std::path::PathBuf;

use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::api::{HttpClient, ListingPaginator};
use crate::config::{normalize_subreddit, validate_limit, Config, MediaKind, SortMode};
use crate::download::media::{DownloadOutcome, DownloadRequest, Downloader};
use crate::download::state::{DownloadCounter, ScrapeStats};
use crate::error::{Error, Result};
use crate::fs::paths::{ensure_dir, output_dir};
use crate::media::{extractor_for, CandidateUrl, MediaExtractor};
use crate::output::{EventSink, ScrapeEvent};
use crate::resolve::{DirectResolver, GifResolver, MediaResolver};

/// What to scrape and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub subreddit: String,
    pub sort: SortMode,
    pub output_dir: PathBuf,
    pub limit: u32,
}

impl ScrapeRequest {
    pub fn new(
        subreddit: impl Into<String>,
        sort: SortMode,
        output_dir: impl Into<PathBuf>,
        limit: u32,
    ) -> Self {
        Self {
            subreddit: subreddit.into(),
            sort,
            output_dir: output_dir.into(),
            limit,
        }
    }

    /// Build a request from the `[scrape]` section, laying out the output
    /// directory per media kind.
    pub fn from_config(config: &Config) -> Result<Self> {
        let subreddit = normalize_subreddit(&config.scrape.subreddit)?;
        let limit = validate_limit(config.scrape.limit as i64)?;
        let dir = output_dir(config, &subreddit, config.scrape.media_kind);

        Ok(Self::new(subreddit, config.scrape.sort, dir, limit))
    }
}

/// What a finished scrape did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub kind: MediaKind,
    pub subreddit: String,
    pub output_dir: PathBuf,
    pub limit: u32,
    pub downloaded: u32,
    pub stats: ScrapeStats,
}

/// One paginated walk, parameterized by an extractor and a resolver.
pub struct ScrapeEngine {
    config: Config,
    http: HttpClient,
    extractor: Box<dyn MediaExtractor>,
    resolver: Box<dyn MediaResolver>,
    downloader: Downloader,
    sink: EventSink,
}

impl ScrapeEngine {
    /// Engine with the standard extractor and resolver for `kind`.
    pub fn new(kind: MediaKind, config: &Config, sink: EventSink) -> Result<Self> {
        let http = HttpClient::new(&config.network)?;

        let resolver: Box<dyn MediaResolver> = match kind {
            MediaKind::ThirdPartyGifs => {
                Box::new(GifResolver::new(http.clone(), config, sink.clone()))
            }
            MediaKind::Images | MediaKind::Videos => Box::new(DirectResolver),
        };

        Ok(Self {
            config: config.clone(),
            downloader: Downloader::new(http.clone(), config, sink.clone()),
            http,
            extractor: extractor_for(kind),
            resolver,
            sink,
        })
    }

    /// Replace the extraction and resolution strategy.
    pub fn with_strategy(
        mut self,
        extractor: Box<dyn MediaExtractor>,
        resolver: Box<dyn MediaResolver>,
    ) -> Self {
        self.extractor = extractor;
        self.resolver = resolver;
        self
    }

    pub fn kind(&self) -> MediaKind {
        self.extractor.kind()
    }

    /// Run the scrape. Validation errors are returned before any request is
    /// made; everything after that degrades to skipping a post or ending the
    /// walk, and the final count is always reported.
    pub async fn run(&self, request: &ScrapeRequest) -> Result<ScrapeSummary> {
        let subreddit = normalize_subreddit(&request.subreddit)?;
        let limit = validate_limit(request.limit as i64)?;

        self.sink.status("Downloading...");
        self.sink.info(format!(
            "Starting download from r/{} ({})",
            subreddit, request.sort
        ));
        self.sink
            .info(format!("Saving to: {}", request.output_dir.display()));

        if let Err(e) = ensure_dir(&request.output_dir).await {
            self.sink.error(format!("Error: {}", e));
            self.sink.status("Error occurred");
            self.sink.emit(ScrapeEvent::Finished { downloaded: 0 });
            return Err(e);
        }

        let mut counter = DownloadCounter::new(limit);
        let stats = self.walk(&subreddit, request, &mut counter).await;

        self.sink.info(format!(
            "Total {} downloaded: {}",
            self.kind().noun(),
            counter.count()
        ));
        self.sink.status("Download completed");
        self.sink.emit(ScrapeEvent::Finished {
            downloaded: counter.count(),
        });

        Ok(ScrapeSummary {
            kind: self.kind(),
            subreddit,
            output_dir: request.output_dir.clone(),
            limit,
            downloaded: counter.count(),
            stats,
        })
    }

    async fn walk(
        &self,
        subreddit: &str,
        request: &ScrapeRequest,
        counter: &mut DownloadCounter,
    ) -> ScrapeStats {
        let kind = self.kind();
        let use_title = self.config.scrape.title_filenames || kind == MediaKind::ThirdPartyGifs;
        let mut stats = ScrapeStats::default();

        let paginator = ListingPaginator::new(
            self.http.clone(),
            &self.config.endpoints.listing_base,
            subreddit,
            request.sort,
            self.config.network.page_size,
            self.sink.clone(),
        );
        let mut pages = std::pin::pin!(paginator.into_stream());

        'pages: while let Some(page) = pages.next().await {
            stats.pages_fetched += 1;

            for post in &page.posts {
                stats.add_post();

                let Some(candidate) = self.extractor.extract(post) else {
                    continue;
                };
                stats.add_candidate();

                if let CandidateUrl::Page(page_url) = &candidate.url {
                    self.sink
                        .info(format!("Found third-party link: {}", page_url));
                }

                let Some(resolved) = self.resolver.resolve(candidate).await else {
                    stats.add_unresolved();
                    self.sink.warn("Failed to extract a direct media URL, skipping");
                    continue;
                };
                let Some(url) = resolved.direct_url() else {
                    stats.add_unresolved();
                    continue;
                };

                let download = DownloadRequest {
                    url,
                    kind,
                    referrer: resolved.referrer.as_deref(),
                    title: if use_title {
                        resolved.title.as_deref()
                    } else {
                        None
                    },
                };

                match self
                    .downloader
                    .download(&download, &request.output_dir, counter)
                    .await
                {
                    DownloadOutcome::Downloaded { bytes, .. } => stats.add_bytes(bytes),
                    DownloadOutcome::Exhausted { .. } => stats.add_failed(),
                    DownloadOutcome::LimitReached => break 'pages,
                }

                if counter.is_full() {
                    self.sink
                        .info(format!("Reached download limit of {}", counter.limit()));
                    break 'pages;
                }
            }
        }

        stats
    }
}

/// Run a scrape for `kind`.
pub async fn scrape(
    kind: MediaKind,
    config: &Config,
    request: &ScrapeRequest,
    sink: &EventSink,
) -> Result<ScrapeSummary> {
    ScrapeEngine::new(kind, config, sink.clone())?
        .run(request)
        .await
}

/// Download images from a subreddit.
pub async fn scrape_images(
    config: &Config,
    request: &ScrapeRequest,
    sink: &EventSink,
) -> Result<ScrapeSummary> {
    scrape(MediaKind::Images, config, request, sink).await
}

/// Download Reddit-hosted videos and linked GIF/MP4/WebM files.
pub async fn scrape_videos(
    config: &Config,
    request: &ScrapeRequest,
    sink: &EventSink,
) -> Result<ScrapeSummary> {
    scrape(MediaKind::Videos, config, request, sink).await
}

/// Download GIFs hosted on third-party sites.
pub async fn scrape_gifs(
    config: &Config,
    request: &ScrapeRequest,
    sink: &EventSink,
) -> Result<ScrapeSummary> {
    scrape(MediaKind::ThirdPartyGifs, config, request, sink).await
}

/// A scrape running on a background task.
pub struct ScrapeHandle {
    /// Events emitted by the scrape. The channel closes when the task ends.
    pub events: UnboundedReceiver<ScrapeEvent>,
    task: JoinHandle<Result<ScrapeSummary>>,
}

impl ScrapeHandle {
    /// Wait for the task to finish.
    pub async fn join(self) -> Result<ScrapeSummary> {
        self.task
            .await
            .map_err(|e| Error::Worker(e.to_string()))?
    }
}

/// Start a scrape on a background task so the caller can keep consuming
/// events.
pub fn spawn_scrape(kind: MediaKind, config: Config, request: ScrapeRequest) -> ScrapeHandle {
    let (sink, events) = EventSink::channel();
    let task = tokio::spawn(async move { scrape(kind, &config, &request, &sink).await });
    ScrapeHandle { events, task }
}
