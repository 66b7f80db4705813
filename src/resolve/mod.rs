//! Resolution of candidate URLs into directly downloadable ones.

pub mod chain;
pub mod patterns;
pub mod token;

use async_trait::async_trait;

use crate::media::{CandidateUrl, MediaCandidate};

pub use chain::GifResolver;
pub use token::TokenCache;

/// Turns a candidate into one with a direct media URL.
///
/// `None` means the media could not be located. That is not an error; the
/// post is skipped.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, candidate: MediaCandidate) -> Option<MediaCandidate>;
}

/// Accepts direct URLs as they are. Used by the image and video scrapers,
/// whose extractors never produce page URLs.
#[derive(Debug, Default)]
pub struct DirectResolver;

#[async_trait]
impl MediaResolver for DirectResolver {
    async fn resolve(&self, candidate: MediaCandidate) -> Option<MediaCandidate> {
        match candidate.url {
            CandidateUrl::Direct(_) => Some(candidate),
            CandidateUrl::Page(_) => None,
        }
    }
}
