//! Batch progress display over configured runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Tracks images produced per run and runs completed overall
///
/// One bar per run counts saved images; a batch bar appears once more than
/// one run is scheduled.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static RUN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Runs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            run_bar: None,
        }
    }

    /// Prepare the batch bar for `run_count` runs
    pub fn initialize(&mut self, run_count: usize) {
        if run_count > 1 {
            let batch_bar = ProgressBar::new(run_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Show a bar for a run producing `images` images
    pub fn start_run(&mut self, name: &str, images: usize) {
        let bar = ProgressBar::new(images as u64);
        bar.set_style(RUN_STYLE.clone());
        bar.set_prefix(name.to_string());
        if let Some(old) = self.run_bar.replace(self.multi_progress.add(bar)) {
            old.finish_and_clear();
        }
    }

    /// Report an attempt on the current image
    pub fn record_attempt(&self, attempt: usize, attempts: usize) {
        if let Some(ref bar) = self.run_bar {
            bar.set_message(format!("attempt {attempt}/{attempts}"));
        }
    }

    /// Advance the current run by one image
    pub fn complete_image(&self) {
        if let Some(ref bar) = self.run_bar {
            bar.inc(1);
        }
    }

    /// Mark the current run finished
    pub fn complete_run(&mut self) {
        if let Some(bar) = self.run_bar.take() {
            bar.finish_with_message("done");
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All runs processed");
        }
        let _ = self.multi_progress.clear();
    }
}
