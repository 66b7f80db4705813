//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{parse_limit, Config, MediaKind, SortMode};
use crate::error::Result;

/// Subreddit media scraper CLI.
#[derive(Parser, Debug)]
#[command(
    name = "subreddit-scraper",
    version,
    about = "Download images, videos and GIFs from a subreddit",
    long_about = "A CLI tool to download media posted to a subreddit.\n\n\
                  Walks the subreddit listing page by page and downloads images, \
                  Reddit-hosted videos or third-party GIFs until the limit is reached."
)]
pub struct Args {
    /// Subreddit to scrape, with or without the "r/" prefix.
    #[arg(short, long)]
    pub subreddit: Option<String>,

    /// Listing sort order.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Kind of media to download.
    #[arg(short = 'm', long = "media", value_enum)]
    pub media_kind: Option<MediaKindArg>,

    /// Maximum number of files to download (a positive integer).
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Name files after post titles for every media kind.
    #[arg(long)]
    pub titles: bool,

    /// Download attempts per file.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "SCRAPER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Never retry downloads without certificate verification.
    #[arg(long)]
    pub strict_tls: bool,

    /// Hide per-file progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI sort argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Hot,
    New,
    Top,
    Best,
    Rising,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Hot => SortMode::Hot,
            SortArg::New => SortMode::New,
            SortArg::Top => SortMode::Top,
            SortArg::Best => SortMode::Best,
            SortArg::Rising => SortMode::Rising,
        }
    }
}

/// CLI media kind argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaKindArg {
    /// Directly linked and preview images.
    Images,
    /// Reddit-hosted videos and linked GIF/MP4/WebM files.
    Videos,
    /// GIFs hosted on third-party embed sites.
    Gifs,
}

impl From<MediaKindArg> for MediaKind {
    fn from(arg: MediaKindArg) -> Self {
        match arg {
            MediaKindArg::Images => MediaKind::Images,
            MediaKindArg::Videos => MediaKind::Videos,
            MediaKindArg::Gifs => MediaKind::ThirdPartyGifs,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    ///
    /// Fails when the limit text is not a positive integer.
    pub fn merge_into_config(&self, config: &mut Config) -> Result<()> {
        if let Some(subreddit) = &self.subreddit {
            config.scrape.subreddit = subreddit.clone();
        }

        if let Some(sort) = self.sort {
            config.scrape.sort = sort.into();
        }

        if let Some(kind) = self.media_kind {
            config.scrape.media_kind = kind.into();
        }

        if let Some(limit) = &self.limit {
            config.scrape.limit = parse_limit(limit)?;
        }

        if let Some(dir) = &self.download_directory {
            config.scrape.download_directory = Some(dir.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.network.user_agent = user_agent.clone();
        }

        if let Some(attempts) = self.max_attempts {
            config.network.max_attempts = attempts;
        }

        // Boolean flags (only override if set to non-default)
        if self.titles {
            config.scrape.title_filenames = true;
        }

        if self.strict_tls {
            config.network.insecure_tls_fallback = false;
        }

        Ok(())
    }
}
