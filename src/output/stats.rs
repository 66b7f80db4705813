//! Statistics reporting.

use console::style;

use crate::download::ScrapeSummary;

/// Print what a scrape did.
pub fn print_scrape_stats(summary: &ScrapeSummary) {
    let stats = &summary.stats;

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for r/{}:", summary.subreddit)).bold()
    );
    println!("  Pages fetched:   {}", stats.pages_fetched);
    println!("  Posts seen:      {}", stats.posts_seen);
    println!("  Media found:     {}", stats.candidates);
    if stats.unresolved > 0 {
        println!("  Unresolved:      {}", style(stats.unresolved).yellow());
    }
    if stats.failed_downloads > 0 {
        println!("  Failed:          {}", style(stats.failed_downloads).red());
    }
    println!("  Bytes written:   {}", format_bytes(stats.bytes_written));
    println!(
        "  Total:           {} of {} {} downloaded",
        style(summary.downloaded).green(),
        summary.limit,
        summary.kind.noun()
    );
    println!("  Directory:       {}", summary.output_dir.display());
    println!("{}", style("═".repeat(50)).dim());
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
