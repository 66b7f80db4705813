//! Output module for scrape events, console output and progress.
//!
//! Provides:
//! - The event sink a scrape reports through
//! - Colored console output
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod sink;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_debug, print_error, print_event, print_info,
    print_log, print_status, print_success, print_warning,
};
pub use progress::{create_download_bar, create_spinner, ProgressMarks};
pub use sink::{EventSink, LogLevel, ScrapeEvent};
pub use stats::{format_bytes, print_scrape_stats};
