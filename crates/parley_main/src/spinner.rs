use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages spinner functionality for the UI
#[derive(Default)]
pub struct SpinnerManager {
    spinner: Option<ProgressBar>,
}

impl SpinnerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) -> Result<()> {
        self.stop();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.green} {msg} {elapsed:.dim}")?,
        );
        pb.enable_steady_tick(Duration::from_millis(60));
        pb.set_message(message.green().bold().to_string());

        self.spinner = Some(pb);
        Ok(())
    }

    /// Stop the active spinner, if any, and erase it
    pub fn stop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for SpinnerManager {
    fn drop(&mut self) {
        self.stop();
    }
}
