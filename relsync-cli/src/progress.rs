//! Single-line progress display for the sequential catalog passes.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// A progress bar that lines of output can be printed above.
///
/// Hidden entirely when `quiet` is set.
pub(crate) struct StatusBar {
    bar: ProgressBar,
}

impl StatusBar {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template(
            "  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
        .tick_chars("/-\\|");
        bar.set_style(style);
        Self { bar }
    }

    pub(crate) fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.enable_steady_tick(TICK_INTERVAL);
    }

    pub(crate) fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    /// Advance by one item.
    pub(crate) fn tick_item(&self) {
        self.bar.inc(1);
    }

    /// Log a line at info level above the bar without tearing it.
    pub(crate) fn println(&self, line: &str) {
        self.bar.suspend(|| log::info!("{line}"));
    }

    /// Log a warning above the bar.
    pub(crate) fn warn(&self, line: &str) {
        self.bar.suspend(|| log::warn!("{line}"));
    }

    pub(crate) fn finish(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}
