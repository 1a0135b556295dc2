//! Progress display for demo solves

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single-bar progress over the cells collapsed so far
///
/// The position tracks collapsed cells, which is monotonic within an attempt
/// but snaps back to the pinned count whenever a contradiction restarts the
/// wave; the message keeps the reset tally visible alongside.
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a bar sized to the wave's cell count
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(SOLVE_STYLE.clone());
        Self { bar }
    }

    /// Report collapsed-cell and reset counts
    pub fn update(&self, collapsed: usize, resets: u64) {
        self.bar.set_position(collapsed as u64);
        self.bar.set_message(format!("resets: {resets}"));
    }

    /// Clear the bar once solving ends
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
