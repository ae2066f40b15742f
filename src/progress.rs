//! Progress display for fetch and publish phases

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while fetching stats and publishing
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a spinner for interactive runs
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap();

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));

        Self { pb }
    }

    /// Create a display that draws nothing (quiet runs and tests)
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Announce the phase being worked on
    pub fn phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Update the repository pagination counter
    pub fn repositories_fetched(&self, count: usize) {
        self.pb.set_message(format!("fetched {count} repositories"));
    }

    /// Clear the spinner
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error, leaving the last message visible
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self::new()
    }
}
