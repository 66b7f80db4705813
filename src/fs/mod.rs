//! Filesystem module.
//!
//! Provides:
//! - Download directory layout
//! - Filename sanitization and extension inference

pub mod naming;
pub mod paths;

pub use naming::{build_filename, file_extension, sanitize_title};
pub use paths::{ensure_dir, output_dir};
