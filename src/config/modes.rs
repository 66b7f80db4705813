//! Listing sort modes and media kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort order of a subreddit listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Hot,
    New,
    Top,
    Best,
    Rising,
}

impl SortMode {
    /// Path segment used in the listing URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Top => "top",
            SortMode::Best => "best",
            SortMode::Rising => "rising",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            "top" => Ok(SortMode::Top),
            "best" => Ok(SortMode::Best),
            "rising" => Ok(SortMode::Rising),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}

/// Which kind of media a scrape collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    /// Directly linked or preview images.
    #[default]
    Images,
    /// Reddit-hosted videos and directly linked GIF/MP4/WebM files.
    Videos,
    /// GIFs hosted on third-party embed sites, resolved to direct URLs.
    ThirdPartyGifs,
}

impl MediaKind {
    /// Subfolder used under the subreddit's download directory.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaKind::Images => "images",
            MediaKind::Videos => "videos",
            MediaKind::ThirdPartyGifs => "redgif_videos",
        }
    }

    /// Filename stem used when a download has no title.
    pub fn file_stem(&self) -> &'static str {
        match self {
            MediaKind::Images => "image",
            MediaKind::Videos | MediaKind::ThirdPartyGifs => "video",
        }
    }

    /// Noun used in the final summary line.
    pub fn noun(&self) -> &'static str {
        match self {
            MediaKind::Images => "images",
            MediaKind::Videos => "videos/gifs",
            MediaKind::ThirdPartyGifs => "third-party gif videos",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Images => write!(f, "images"),
            MediaKind::Videos => write!(f, "videos"),
            MediaKind::ThirdPartyGifs => write!(f, "third-party-gifs"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "images" | "image" => Ok(MediaKind::Images),
            "videos" | "video" => Ok(MediaKind::Videos),
            "third-party-gifs" | "third-party gifs" | "gifs" | "redgifs" => {
                Ok(MediaKind::ThirdPartyGifs)
            }
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}
