//! Media module for candidate representation and extraction.

pub mod extract;
pub mod item;

pub use extract::{
    extractor_for, ImageExtractor, MediaExtractor, ThirdPartyExtractor, VideoExtractor,
};
pub use item::{CandidateUrl, MediaCandidate};
