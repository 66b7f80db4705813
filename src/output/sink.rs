//! Event sink injected into every scrape.
//!
//! A scrape never writes to stdout itself. Everything a front-end may want
//! to show (log lines, status text, byte progress) is sent as a
//! [`ScrapeEvent`] through the sink. When no channel is attached the events
//! fall through to `tracing`.
//!
//! The sender half is owned by the scrape task, so the channel closes as soon
//! as the task finishes, whether it succeeded, failed or panicked.

use std::path::PathBuf;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Something that happened during a scrape.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent {
    /// Free-form log line.
    Log { level: LogLevel, message: String },
    /// Short status text for a status bar.
    Status(String),
    /// A download started writing to `file`.
    DownloadStarted { file: String, total: Option<u64> },
    /// Bytes written so far for the current download.
    Progress { downloaded: u64, total: Option<u64> },
    /// A file passed verification and was counted.
    Downloaded { path: PathBuf, bytes: u64 },
    /// The scrape is over; `downloaded` files were written.
    Finished { downloaded: u32 },
}

/// Cloneable handle used to emit [`ScrapeEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<ScrapeEvent>>,
}

impl EventSink {
    /// Create a sink and the receiver a front-end reads from.
    pub fn channel() -> (Self, UnboundedReceiver<ScrapeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that only forwards to `tracing`.
    pub fn tracing_only() -> Self {
        Self { tx: None }
    }

    /// Emit an event. A closed receiver is not an error: the front-end may
    /// have gone away while the scrape finishes.
    pub fn emit(&self, event: ScrapeEvent) {
        match &self.tx {
            Some(tx) => {
                let _ = tx.send(event);
            }
            None => trace_event(&event),
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(ScrapeEvent::Log {
            level,
            message: message.into(),
        });
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn status(&self, status: impl Into<String>) {
        self.emit(ScrapeEvent::Status(status.into()));
    }
}

fn trace_event(event: &ScrapeEvent) {
    match event {
        ScrapeEvent::Log { level, message } => match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        },
        ScrapeEvent::Status(status) => tracing::info!("Status: {}", status),
        ScrapeEvent::DownloadStarted { file, total } => {
            tracing::debug!("Writing {} ({:?} bytes)", file, total)
        }
        ScrapeEvent::Progress { downloaded, total } => {
            tracing::trace!("Progress {}/{:?}", downloaded, total)
        }
        ScrapeEvent::Downloaded { path, bytes } => {
            tracing::info!("Downloaded: {} ({} bytes)", path.display(), bytes)
        }
        ScrapeEvent::Finished { downloaded } => tracing::info!("Finished: {}", downloaded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.status("Downloading...");
        sink.info("hello");

        assert_eq!(
            rx.try_recv().unwrap(),
            ScrapeEvent::Status("Downloading...".to_string())
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ScrapeEvent::Log {
                level: LogLevel::Info,
                message: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_channel_closes_when_all_senders_drop() {
        let (sink, mut rx) = EventSink::channel();
        let clone = sink.clone();
        drop(sink);
        clone.warn("still open");
        drop(clone);

        assert!(rx.try_recv().is_ok());
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn test_send_after_receiver_dropped_is_ignored() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.info("nobody listening");
    }
}
