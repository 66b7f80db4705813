//! API response type definitions.

use serde::Deserialize;

/// Base URL used to turn a post permalink into an absolute URL.
pub const REDDIT_BASE: &str = "https://www.reddit.com";

/// Listing response: `{ data: { children: [...], after } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    pub after: Option<String>,
}

/// One child of a listing. The post body is decoded separately so a single
/// malformed post cannot fail the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One post in a listing. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRecord {
    pub url: Option<String>,
    pub post_hint: Option<String>,
    pub preview: Option<Preview>,
    pub is_video: Option<bool>,
    pub media: Option<PostMedia>,
    pub selftext: Option<String>,
    pub title: Option<String>,
    pub permalink: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewImage {
    pub source: Option<ImageSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSource {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMedia {
    pub reddit_video: Option<RedditVideo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditVideo {
    pub fallback_url: Option<String>,
}

impl PostRecord {
    /// The post's link, if non-empty.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// `preview.images[0].source.url`.
    pub fn preview_image_url(&self) -> Option<&str> {
        self.preview
            .as_ref()?
            .images
            .first()?
            .source
            .as_ref()?
            .url
            .as_deref()
    }

    /// `media.reddit_video.fallback_url`.
    pub fn reddit_video_url(&self) -> Option<&str> {
        self.media
            .as_ref()?
            .reddit_video
            .as_ref()?
            .fallback_url
            .as_deref()
    }

    pub fn is_video(&self) -> bool {
        self.is_video.unwrap_or(false)
    }

    /// Non-empty title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// URL sent as `Referer` when downloading this post's media: the post's
    /// link, else its absolute permalink.
    pub fn referrer(&self) -> Option<String> {
        if let Some(link) = self.link() {
            return Some(link.to_string());
        }
        self.permalink
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", REDDIT_BASE, p))
    }
}

/// Third-party metadata response: `{ gif: { urls: {...} } }`.
#[derive(Debug, Default, Deserialize)]
pub struct GifResponse {
    pub gif: Option<GifInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GifInfo {
    #[serde(default)]
    pub urls: GifUrls,
}

/// Rendition URLs of a hosted GIF.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GifUrls {
    pub hd: Option<String>,
    pub sd: Option<String>,
    pub mp4: Option<String>,
    pub mobile: Option<String>,
}

impl GifUrls {
    /// First available URL in priority order `hd, sd, mp4, mobile`.
    pub fn best(&self) -> Option<&str> {
        [&self.hd, &self.sd, &self.mp4, &self.mobile]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.is_empty())
    }
}

/// Temporary token response: `{ token }`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_record_tolerates_missing_and_null_fields() {
        let post: PostRecord = serde_json::from_str(r#"{"media": null, "title": "x"}"#).unwrap();
        assert!(post.link().is_none());
        assert!(post.reddit_video_url().is_none());
        assert!(post.preview_image_url().is_none());
        assert!(!post.is_video());
    }

    #[test]
    fn test_post_record_nested_fields() {
        let post: PostRecord = serde_json::from_str(
            r#"{
                "is_video": true,
                "media": {"reddit_video": {"fallback_url": "https://v.redd.it/a/DASH_720.mp4"}},
                "preview": {"images": [{"source": {"url": "https://preview.redd.it/a.jpg?x=1&amp;y=2"}}]},
                "permalink": "/r/test/comments/abc/title/"
            }"#,
        )
        .unwrap();

        assert!(post.is_video());
        assert_eq!(
            post.reddit_video_url(),
            Some("https://v.redd.it/a/DASH_720.mp4")
        );
        assert_eq!(
            post.preview_image_url(),
            Some("https://preview.redd.it/a.jpg?x=1&amp;y=2")
        );
        assert_eq!(
            post.referrer().as_deref(),
            Some("https://www.reddit.com/r/test/comments/abc/title/")
        );
    }

    #[test]
    fn test_gif_urls_priority() {
        let urls = GifUrls {
            hd: None,
            sd: Some("https://media/sd.mp4".to_string()),
            mp4: None,
            mobile: Some("https://media/mobile.mp4".to_string()),
        };
        assert_eq!(urls.best(), Some("https://media/sd.mp4"));
        assert_eq!(GifUrls::default().best(), None);
    }

    #[test]
    fn test_listing_without_data() {
        let listing: ListingResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.data.children.is_empty());
        assert!(listing.data.after.is_none());
    }
}
