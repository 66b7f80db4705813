//! Per-scrape download state.

/// Number of files written so far, bounded by the scrape's limit.
#[derive(Debug, Clone)]
pub struct DownloadCounter {
    count: u32,
    limit: u32,
}

impl DownloadCounter {
    pub fn new(limit: u32) -> Self {
        Self { count: 0, limit }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether the limit has been reached.
    pub fn is_full(&self) -> bool {
        self.count >= self.limit
    }

    /// Ordinal given to the next file.
    pub fn next_ordinal(&self) -> u32 {
        self.count
    }

    /// Count one verified download. Returns `false`, leaving the count
    /// unchanged, when the limit was already reached.
    pub(crate) fn increment(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.count += 1;
        true
    }
}

/// Counters reported at the end of a scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    pub pages_fetched: u32,
    pub posts_seen: u64,
    pub candidates: u64,
    pub unresolved: u64,
    pub failed_downloads: u64,
    pub bytes_written: u64,
}

impl ScrapeStats {
    pub fn add_post(&mut self) {
        self.posts_seen += 1;
    }

    pub fn add_candidate(&mut self) {
        self.candidates += 1;
    }

    pub fn add_unresolved(&mut self) {
        self.unresolved += 1;
    }

    pub fn add_failed(&mut self) {
        self.failed_downloads += 1;
    }

    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }
}
