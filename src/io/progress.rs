//! Row-level progress display for a synthesis run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} rows ({{msg}} placements)"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks canvas rows completed and placements made
pub struct ProgressManager {
    bar: ProgressBar,
    placements: usize,
}

impl ProgressManager {
    /// Create a progress bar for a canvas of `canvas_height` pixels
    ///
    /// The bar counts rows of pixels filled, since placement rows vary in
    /// height once the last row is clipped.
    pub fn new(label: &str, canvas_height: usize) -> Self {
        let bar = ProgressBar::new(canvas_height as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(label.to_string());
        bar.set_message("0");
        Self { bar, placements: 0 }
    }

    /// A manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            placements: 0,
        }
    }

    /// Report one more placement and the number of pixel rows completed
    pub fn record_placement(&mut self, rows_completed: usize) {
        self.placements += 1;
        self.bar.set_position(rows_completed as u64);
        self.bar.set_message(self.placements.to_string());
    }

    /// Placements reported so far
    pub const fn placements(&self) -> usize {
        self.placements
    }

    /// Pixel rows reported as completed
    pub fn rows_completed(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
