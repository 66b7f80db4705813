//! Subreddit media scraper - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use indicatif::ProgressBar;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{fmt, EnvFilter};

use subreddit_scraper::{
    cli::Args,
    config::{validate_config, Config},
    download::{spawn_scrape, ScrapeRequest},
    error::{exit_codes, Error, Result},
    output::{
        create_download_bar, create_spinner, print_banner, print_config_summary, print_error,
        print_event, print_info, print_scrape_stats, print_warning, LogLevel, ScrapeEvent,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_) | Error::Http(_) => ExitCode::from(exit_codes::API_ERROR as u8),
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config)?;
    validate_config(&config)?;

    let request = ScrapeRequest::from_config(&config)?;
    let kind = config.scrape.media_kind;

    print_config_summary(
        &request.subreddit,
        request.sort.as_str(),
        &kind.to_string(),
        request.limit,
        &request.output_dir.display().to_string(),
    );

    let mut handle = spawn_scrape(kind, config, request);
    render_events(&mut handle.events, args.quiet, args.debug).await;

    let summary = handle.join().await?;
    print_scrape_stats(&summary);

    if summary.downloaded == 0 && summary.stats.failed_downloads > 0 {
        return Err(Error::Download(format!(
            "{} download(s) failed and nothing was saved",
            summary.stats.failed_downloads
        )));
    }

    Ok(())
}

/// Render scrape events until the scrape task drops its sender.
async fn render_events(events: &mut UnboundedReceiver<ScrapeEvent>, quiet: bool, debug: bool) {
    let mut bar: Option<ProgressBar> = None;

    while let Some(event) = events.recv().await {
        match &event {
            ScrapeEvent::DownloadStarted { file, total } => {
                if let Some(old) = bar.take() {
                    old.finish_and_clear();
                }
                if !quiet {
                    bar = Some(match total {
                        Some(total) => create_download_bar(*total, file),
                        None => create_spinner(file),
                    });
                }
            }
            ScrapeEvent::Progress { downloaded, .. } => {
                if let Some(bar) = &bar {
                    bar.set_position(*downloaded);
                }
            }
            ScrapeEvent::Log {
                level: LogLevel::Info,
                ..
            } if quiet => {}
            _ => {
                if matches!(
                    event,
                    ScrapeEvent::Downloaded { .. } | ScrapeEvent::Finished { .. }
                ) {
                    if let Some(done) = bar.take() {
                        done.finish_and_clear();
                    }
                }
                match &bar {
                    Some(bar) => bar.suspend(|| print_event(&event, debug)),
                    None => print_event(&event, debug),
                }
            }
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
}
