//! Download directory layout.

use std::path::{Path, PathBuf};

use crate::config::{Config, MediaKind};
use crate::error::Result;

/// Folder created in the working directory when no custom directory is
/// configured.
pub const DEFAULT_PARENT_DIR: &str = "reddit_downloads";

/// Directory a scrape writes into.
///
/// With a custom directory: `<custom>/<kind folder>`. Otherwise:
/// `<cwd>/reddit_downloads/<subreddit>/<kind folder>`.
pub fn output_dir(config: &Config, subreddit: &str, kind: MediaKind) -> PathBuf {
    let base = match &config.scrape.download_directory {
        Some(dir) => dir.clone(),
        None => config
            .download_directory()
            .join(DEFAULT_PARENT_DIR)
            .join(subreddit),
    };

    base.join(kind.folder_name())
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
