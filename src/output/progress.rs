//! Progress reporting: coarse progress marks for log output and indicatif
//! bars for the terminal.

use indicatif::{ProgressBar, ProgressStyle};

const MIB: u64 = 1024 * 1024;

/// Decides when a download has made enough progress to report.
///
/// With a known length a report is due at every ~10% of the total; without
/// one, at every completed MiB.
#[derive(Debug, Clone)]
pub struct ProgressMarks {
    total: Option<u64>,
    step: u64,
    next_mark: u64,
}

impl ProgressMarks {
    pub fn new(total: Option<u64>) -> Self {
        let step = match total {
            Some(total) if total > 0 => (total / 10).max(1),
            _ => MIB,
        };
        Self {
            total: total.filter(|t| *t > 0),
            step,
            next_mark: step,
        }
    }

    /// Record the byte count so far; returns a message when a mark was
    /// crossed.
    pub fn advance(&mut self, downloaded: u64) -> Option<String> {
        if downloaded < self.next_mark {
            return None;
        }
        while self.next_mark <= downloaded {
            self.next_mark += self.step;
        }

        Some(match self.total {
            Some(total) => format!(
                "Download progress: {:.1}%",
                downloaded as f64 / total as f64 * 100.0
            ),
            None => format!(
                "Downloaded {:.1} MB",
                (downloaded / MIB * MIB) as f64 / MIB as f64
            ),
        })
    }
}

/// Create a spinner for downloads of unknown size.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Create a progress bar for downloads.
pub fn create_download_bar(total: u64, message: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_message(message.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_every_tenth_with_known_total() {
        let mut marks = ProgressMarks::new(Some(1000));
        assert_eq!(marks.advance(50), None);
        assert_eq!(marks.advance(100).as_deref(), Some("Download progress: 10.0%"));
        assert_eq!(marks.advance(150), None);
        // Jumping several marks at once reports once.
        assert_eq!(marks.advance(450).as_deref(), Some("Download progress: 45.0%"));
        assert_eq!(marks.advance(480), None);
        assert!(marks.advance(1000).is_some());
    }

    #[test]
    fn test_marks_every_mib_without_total() {
        let mut marks = ProgressMarks::new(None);
        assert_eq!(marks.advance(MIB - 1), None);
        assert_eq!(marks.advance(MIB + 10).as_deref(), Some("Downloaded 1.0 MB"));
        assert_eq!(marks.advance(MIB + 20), None);
        assert_eq!(marks.advance(3 * MIB).as_deref(), Some("Downloaded 3.0 MB"));
    }

    #[test]
    fn test_zero_total_treated_as_unknown() {
        let mut marks = ProgressMarks::new(Some(0));
        assert_eq!(marks.advance(10), None);
        assert!(marks.advance(MIB).is_some());
    }
}
