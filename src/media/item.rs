//! Media candidate representation.

use crate::config::MediaKind;

/// Where a candidate's media lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateUrl {
    /// URL of the media bytes.
    Direct(String),
    /// URL of a page that embeds the media and must be resolved first.
    Page(String),
}

impl CandidateUrl {
    pub fn as_str(&self) -> &str {
        match self {
            CandidateUrl::Direct(url) | CandidateUrl::Page(url) => url,
        }
    }
}

/// Media found in one post, along with what the downloader needs to name
/// and fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCandidate {
    pub kind: MediaKind,
    pub url: CandidateUrl,
    /// Sent as `Referer` when downloading.
    pub referrer: Option<String>,
    /// Post title, used as the filename base when set.
    pub title: Option<String>,
}

impl MediaCandidate {
    pub fn direct(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: CandidateUrl::Direct(url.into()),
            referrer: None,
            title: None,
        }
    }

    pub fn page(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: CandidateUrl::Page(url.into()),
            referrer: None,
            title: None,
        }
    }

    pub fn with_referrer(mut self, referrer: Option<String>) -> Self {
        self.referrer = referrer;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Replace the URL with a resolved direct one. The page URL becomes the
    /// referrer when the post did not provide one.
    pub fn with_direct_url(mut self, url: String) -> Self {
        if self.referrer.is_none() {
            self.referrer = Some(self.url.as_str().to_string());
        }
        self.url = CandidateUrl::Direct(url);
        self
    }

    /// The direct URL, if resolved.
    pub fn direct_url(&self) -> Option<&str> {
        match &self.url {
            CandidateUrl::Direct(url) => Some(url),
            CandidateUrl::Page(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_direct_url_keeps_page_as_referrer() {
        let candidate = MediaCandidate::page(MediaKind::ThirdPartyGifs, "https://site/watch/abc")
            .with_direct_url("https://media/abc.mp4".to_string());

        assert_eq!(candidate.direct_url(), Some("https://media/abc.mp4"));
        assert_eq!(candidate.referrer.as_deref(), Some("https://site/watch/abc"));
    }

    #[test]
    fn test_page_has_no_direct_url() {
        let candidate = MediaCandidate::page(MediaKind::ThirdPartyGifs, "https://site/watch/abc");
        assert_eq!(candidate.direct_url(), None);
        assert_eq!(candidate.url.as_str(), "https://site/watch/abc");
    }
}
