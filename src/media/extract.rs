//! Media URL extraction from post records.
//!
//! Each media kind has its own extractor. All of them read only the fields
//! they need and return `None` for posts they do not recognize, which is the
//! common case.

use url::Url;

use crate::api::types::PostRecord;
use crate::config::MediaKind;
use crate::media::item::MediaCandidate;
use crate::resolve::patterns::find_selftext_link;

/// Image extensions accepted by [`ImageExtractor`].
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Video extensions accepted by [`VideoExtractor`].
pub const VIDEO_EXTENSIONS: &[&str] = &["gif", "mp4", "webm"];

/// Hosts whose links point at embed pages rather than media files.
pub const THIRD_PARTY_HOSTS: &[&str] = &["redgifs.com", "gifdeliverynetwork.com"];

/// Produces at most one candidate from a post.
pub trait MediaExtractor: Send + Sync {
    fn kind(&self) -> MediaKind;

    fn extract(&self, post: &PostRecord) -> Option<MediaCandidate>;
}

/// Extractor for a media kind.
pub fn extractor_for(kind: MediaKind) -> Box<dyn MediaExtractor> {
    match kind {
        MediaKind::Images => Box::new(ImageExtractor),
        MediaKind::Videos => Box::new(VideoExtractor),
        MediaKind::ThirdPartyGifs => Box::new(ThirdPartyExtractor),
    }
}

/// Direct image links, falling back to the post's preview image.
#[derive(Debug, Default)]
pub struct ImageExtractor;

impl MediaExtractor for ImageExtractor {
    fn kind(&self) -> MediaKind {
        MediaKind::Images
    }

    fn extract(&self, post: &PostRecord) -> Option<MediaCandidate> {
        let url = match (post.post_hint.as_deref(), post.link()) {
            (Some("image"), Some(url)) => url.to_string(),
            _ => unescape_entities(post.preview_image_url()?),
        };

        if !has_extension(&url, IMAGE_EXTENSIONS) {
            return None;
        }

        Some(
            MediaCandidate::direct(MediaKind::Images, url)
                .with_referrer(post.referrer())
                .with_title(post.title().map(str::to_string)),
        )
    }
}

/// Reddit-hosted videos, falling back to directly linked GIF/MP4/WebM
/// files.
#[derive(Debug, Default)]
pub struct VideoExtractor;

impl MediaExtractor for VideoExtractor {
    fn kind(&self) -> MediaKind {
        MediaKind::Videos
    }

    fn extract(&self, post: &PostRecord) -> Option<MediaCandidate> {
        let url = match post.reddit_video_url() {
            Some(url) if post.is_video() => url,
            _ => post.link()?,
        };

        if !has_extension(url, VIDEO_EXTENSIONS) {
            return None;
        }

        Some(
            MediaCandidate::direct(MediaKind::Videos, url)
                .with_referrer(post.referrer())
                .with_title(post.title().map(str::to_string)),
        )
    }
}

/// Links to third-party GIF hosts, either as the post's link or inside its
/// body text. Produces page URLs that need resolving.
#[derive(Debug, Default)]
pub struct ThirdPartyExtractor;

impl MediaExtractor for ThirdPartyExtractor {
    fn kind(&self) -> MediaKind {
        MediaKind::ThirdPartyGifs
    }

    fn extract(&self, post: &PostRecord) -> Option<MediaCandidate> {
        let page_url = match post.link() {
            Some(url) if is_third_party(url) => url.to_string(),
            _ => find_selftext_link(post.selftext.as_deref()?)?,
        };

        Some(
            MediaCandidate::page(MediaKind::ThirdPartyGifs, page_url)
                .with_referrer(post.link().map(str::to_string))
                .with_title(post.title().map(str::to_string)),
        )
    }
}

/// Whether a URL points at a third-party GIF host.
pub fn is_third_party(url: &str) -> bool {
    THIRD_PARTY_HOSTS.iter().any(|host| url.contains(host))
}

/// Whether the URL's path ends in one of `extensions`, ignoring case and
/// any query string.
pub fn has_extension(url: &str, extensions: &[&str]) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    match path.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            !ext.contains('/') && extensions.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Listing JSON escapes `&` in preview URLs.
fn unescape_entities(url: &str) -> String {
    url.replace("&amp;", "&")
}
