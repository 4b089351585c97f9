//! Progress bar utilities.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Overall and per-item progress for a download batch.
///
/// Items finish in any order; the overall bar counts completions.
pub struct DownloadProgress {
    multi: MultiProgress,
    overall: ProgressBar,
}

impl DownloadProgress {
    pub fn new(total: u64, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let multi = MultiProgress::with_draw_target(target);

        let overall = multi.add(ProgressBar::new(total));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} Media [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            overall.set_style(style.progress_chars("#>-"));
        }

        Self { multi, overall }
    }

    /// Add a transient line for one item.
    pub fn start_item(&self, name: &str) -> ProgressBar {
        let bar = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.dim} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(name.to_string());
        bar
    }

    /// Count one item as completed, whatever its outcome.
    pub fn complete_item(&self) {
        self.overall.inc(1);
    }

    /// Drop an item's line once its post-download pause is over.
    pub fn remove_item(&self, bar: ProgressBar) {
        bar.finish_and_clear();
        self.multi.remove(&bar);
    }

    /// Items completed so far.
    pub fn completed(&self) -> u64 {
        self.overall.position()
    }

    pub fn total(&self) -> u64 {
        self.overall.length().unwrap_or(0)
    }

    pub fn finish(&self) {
        self.overall.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_still_counts() {
        let progress = DownloadProgress::new(3, false);
        let item = progress.start_item("a.jpg");
        progress.complete_item();
        progress.remove_item(item);
        progress.complete_item();

        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.total(), 3);
    }

    #[test]
    fn test_hidden_spinner() {
        let spinner = create_spinner("Fetching likes", false);
        assert!(spinner.is_hidden());
        spinner.finish_and_clear();
    }
}
