//! Media file downloading with retries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::{header, Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::{sleep, timeout};

use crate::api::client::header_map;
use crate::api::{HttpClient, StreamResponse, TrustLevel};
use crate::config::{Config, MediaKind};
use crate::download::retry::{AttemptFailure, RetryPolicy};
use crate::download::state::DownloadCounter;
use crate::error::Error;
use crate::fs::naming::{build_filename, file_extension};
use crate::output::{EventSink, ProgressMarks, ScrapeEvent};

/// One URL to download and how to name it.
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub kind: MediaKind,
    pub referrer: Option<&'a str>,
    /// Title used as filename base; `None` names the file after the kind.
    pub title: Option<&'a str>,
}

/// Result of downloading one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written, verified and counted.
    Downloaded { path: PathBuf, bytes: u64 },
    /// Every attempt failed; the last failure is kept.
    Exhausted { attempts: u32, last: AttemptFailure },
    /// The counter was already full; nothing was requested.
    LimitReached,
}

/// Downloads media files into a directory, retrying per [`RetryPolicy`].
pub struct Downloader {
    http: HttpClient,
    policy: RetryPolicy,
    /// Longest wait for the response or for the next body chunk.
    timeout: Duration,
    sink: EventSink,
}

impl Downloader {
    pub fn new(http: HttpClient, config: &Config, sink: EventSink) -> Self {
        Self {
            http,
            policy: RetryPolicy::from_config(&config.network),
            timeout: config.network.download_timeout(),
            sink,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Download `request.url` into `dest_dir`.
    ///
    /// The counter is incremented only after the written file was verified
    /// to exist and be non-empty. The file is named with the counter's next
    /// ordinal.
    pub async fn download(
        &self,
        request: &DownloadRequest<'_>,
        dest_dir: &Path,
        counter: &mut DownloadCounter,
    ) -> DownloadOutcome {
        if counter.is_full() {
            return DownloadOutcome::LimitReached;
        }

        let ordinal = counter.next_ordinal();
        let max = self.policy.max_attempts;
        let mut attempt = 1;

        loop {
            self.sink.info(format!(
                "Downloading from: {} (Attempt {}/{})",
                request.url, attempt, max
            ));

            match self.attempt(request, dest_dir, ordinal).await {
                Ok((path, bytes)) => {
                    counter.increment();
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    self.sink
                        .info(format!("Downloaded: {} ({} bytes)", name, bytes));
                    self.sink.emit(ScrapeEvent::Downloaded {
                        path: path.clone(),
                        bytes,
                    });
                    return DownloadOutcome::Downloaded { path, bytes };
                }
                Err(failure) => {
                    self.sink.warn(format!(
                        "Failed to download {}: {}. Attempt {}/{}",
                        request.url, failure, attempt, max
                    ));

                    if !self.policy.should_retry(attempt) {
                        self.sink.error(format!(
                            "Giving up on {} after {} attempts",
                            request.url, attempt
                        ));
                        return DownloadOutcome::Exhausted {
                            attempts: attempt,
                            last: failure,
                        };
                    }

                    sleep(self.policy.delay_for(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt: request, write to a part file, verify, rename.
    async fn attempt(
        &self,
        request: &DownloadRequest<'_>,
        dest_dir: &Path,
        ordinal: u32,
    ) -> std::result::Result<(PathBuf, u64), AttemptFailure> {
        let started = self.http.get_stream(
            request.url,
            download_headers(request),
            self.policy.insecure_tls_fallback,
        );
        let StreamResponse { response, trust } = timeout(self.timeout, started)
            .await
            .map_err(|_| AttemptFailure::Timeout)?
            .map_err(|e| match e {
                Error::Http(e) => AttemptFailure::from(e),
                other => AttemptFailure::Transport(other.to_string()),
            })?;

        if trust == TrustLevel::Unverified {
            self.sink.warn(
                "SSL verification failed, continuing without certificate verification",
            );
        }

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            tracing::debug!("Response headers: {:?}", response.headers());
            return Err(AttemptFailure::Status(status.as_u16()));
        }

        let total = response.content_length().filter(|l| *l > 0);
        if total.is_none() {
            self.sink
                .debug("Content-Length is 0 or missing, will try to download anyway");
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let ext = file_extension(request.url, content_type.as_deref());
        let filename = build_filename(request.title, request.kind.file_stem(), ordinal, &ext);
        let final_path = dest_dir.join(&filename);
        let part_path = dest_dir.join(format!(".{}.{}.part", filename, uuid::Uuid::new_v4()));

        self.sink.emit(ScrapeEvent::DownloadStarted {
            file: filename.clone(),
            total,
        });

        if let Err(failure) = self.write_body(response, &part_path, total).await {
            remove_quietly(&part_path).await;
            return Err(failure);
        }

        let size = tokio::fs::metadata(&part_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            remove_quietly(&part_path).await;
            return Err(AttemptFailure::EmptyFile);
        }

        if let Err(e) = tokio::fs::rename(&part_path, &final_path).await {
            remove_quietly(&part_path).await;
            return Err(e.into());
        }

        match tokio::fs::metadata(&final_path).await {
            Ok(meta) if meta.len() > 0 => Ok((final_path, meta.len())),
            _ => Err(AttemptFailure::EmptyFile),
        }
    }

    /// Stream the response body into `path`.
    async fn write_body(
        &self,
        response: Response,
        path: &Path,
        total: Option<u64>,
    ) -> std::result::Result<u64, AttemptFailure> {
        let mut file = File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut marks = ProgressMarks::new(total);
        let mut downloaded: u64 = 0;

        // The timeout bounds each read, not the whole transfer.
        loop {
            let chunk = match timeout(self.timeout, stream.next()).await {
                Ok(Some(chunk)) => chunk?,
                Ok(None) => break,
                Err(_) => return Err(AttemptFailure::Timeout),
            };
            if chunk.is_empty() {
                continue;
            }
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(message) = marks.advance(downloaded) {
                self.sink.debug(message);
                self.sink
                    .emit(ScrapeEvent::Progress { downloaded, total });
            }
        }

        file.flush().await?;
        Ok(downloaded)
    }
}

/// Request headers for a download.
fn download_headers(request: &DownloadRequest<'_>) -> header::HeaderMap {
    let accept = match request.kind {
        MediaKind::Images => "image/avif,image/webp,image/*,*/*;q=0.8",
        MediaKind::Videos | MediaKind::ThirdPartyGifs => {
            "video/webm,video/mp4,video/*;q=0.9,*/*;q=0.8"
        }
    };

    let mut pairs = vec![
        (header::ACCEPT, accept.to_string()),
        (header::RANGE, "bytes=0-".to_string()),
    ];
    if let Some(referrer) = request.referrer {
        pairs.push((header::REFERER, referrer.to_string()));
    }
    header_map(&pairs)
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!("Could not remove {}: {}", path.display(), e);
        }
    }
}
