use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner} [{bar:30}] {pos}/{len} {msg}";

/// Progress bar for refreshing every tracked video.
///
/// Hidden when stdout is not a terminal so piped output stays clean.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    pub fn new(total_videos: usize) -> Self {
        let bar = if console::Term::stdout().is_term() {
            let bar = ProgressBar::new(total_videos as u64);
            if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    /// Mark `current` videos as done, showing the one just processed
    pub fn advance(&self, current: usize, label: &str) {
        self.bar.set_position(current as u64);
        self.bar.set_message(label.to_string());
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn finish_with_summary(&self, duration: Duration, updated: usize, failed: usize) {
        self.clear();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success),
            format!("Refreshed in {}", HumanDuration(duration)).style(theme().success)
        );
        println!(
            "  {} {} updated  {} {} failed",
            Icons::UP.style(theme().accent),
            updated,
            Icons::CROSS.style(theme().accent),
            failed
        );
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_advance_and_clear() {
        let spinner = Spinner::new("Fetching video metadata...");
        spinner.finish_and_clear();

        let progress = ProgressManager::new(3);
        progress.advance(1, "aaaaaaaaaa1");
        progress.advance(3, "aaaaaaaaaa3");
        progress.clear();
    }
}
