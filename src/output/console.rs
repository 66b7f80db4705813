//! Console output utilities.

use console::style;

use crate::output::sink::{LogLevel, ScrapeEvent};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a debug message.
pub fn print_debug(message: &str) {
    println!("{} {}", style("DEBUG").dim(), message);
}

/// Print a status line.
pub fn print_status(status: &str) {
    println!("{} {}", style("STATUS").magenta().bold(), status);
}

/// Print a log line at its level. Debug lines are dropped unless `debug`.
pub fn print_log(level: LogLevel, message: &str, debug: bool) {
    match level {
        LogLevel::Debug if debug => print_debug(message),
        LogLevel::Debug => {}
        LogLevel::Info => print_info(message),
        LogLevel::Warn => print_warning(message),
        LogLevel::Error => print_error(message),
    }
}

/// Render an event as text. Progress events have no line of their own.
pub fn print_event(event: &ScrapeEvent, debug: bool) {
    match event {
        ScrapeEvent::Log { level, message } => print_log(*level, message, debug),
        ScrapeEvent::Status(status) => print_status(status),
        ScrapeEvent::Downloaded { path, .. } => {
            print_success(&format!("Saved {}", path.display()))
        }
        ScrapeEvent::DownloadStarted { .. }
        | ScrapeEvent::Progress { .. }
        | ScrapeEvent::Finished { .. } => {}
    }
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Subreddit Media Scraper                           ║
║     Images, videos and GIFs from any subreddit        ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    subreddit: &str,
    sort: &str,
    media_kind: &str,
    limit: u32,
    download_dir: &str,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Subreddit: r/{}", subreddit);
    println!("  Sort:      {}", sort);
    println!("  Media:     {}", media_kind);
    println!("  Limit:     {}", limit);
    println!("  Directory: {}", download_dir);
    println!();
}
