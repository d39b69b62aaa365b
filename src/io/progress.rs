//! Batch progress display for inbox processing

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::service::handler::RequestOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tally of request outcomes for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Archives delivered
    pub delivered: usize,
    /// Uploads rejected for their extension
    pub rejected: usize,
    /// Uploads that failed during processing
    pub failed: usize,
}

impl BatchSummary {
    /// Count one outcome
    pub const fn record(&mut self, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Delivered { .. } => self.delivered += 1,
            RequestOutcome::Rejected => self.rejected += 1,
            RequestOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Total outcomes counted
    pub const fn total(&self) -> usize {
        self.delivered + self.rejected + self.failed
    }
}

/// Progress bar over the files of one batch
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bar yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Start a bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show which file is being converted
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let display_name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(display_name.into_owned());
        }
    }

    /// Advance past a finished file, noting any failure above the bar
    pub fn complete_file(&self, outcome: &RequestOutcome) {
        let Some(ref bar) = self.bar else {
            return;
        };
        if let RequestOutcome::Failed { reason } = outcome {
            bar.println(format!("failed: {reason}"));
        }
        bar.inc(1);
    }

    /// Clear the bar
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
