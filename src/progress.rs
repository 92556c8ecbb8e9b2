//! Spinner display for long-running build steps

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner for one build step, shown only when progress display is enabled
pub struct StepSpinner {
    pb: Option<ProgressBar>,
}

impl StepSpinner {
    /// Start a spinner with `message`, or a silent no-op when `enabled` is false
    pub fn start(enabled: bool, message: &str) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let style = ProgressStyle::default_spinner()
            .template(&format!("{{spinner}} {}...", message))
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICK_STRINGS);

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb: Some(pb) }
    }

    /// Clear the spinner after the step succeeded
    pub fn finish(mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for StepSpinner {
    fn drop(&mut self) {
        // Left running only when the step bailed out with an error
        if let Some(pb) = self.pb.take() {
            pb.abandon();
        }
    }
}
