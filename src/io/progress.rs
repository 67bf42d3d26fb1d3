//! Terminal progress for a running solve

use std::sync::{Arc, LazyLock};

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::observer::SynthesisObserver;
use crate::catalog::{Possibility, Tileset};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::spatial::GridPosition;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar counting resolved cells
///
/// Acts as an observer; every placement advances the bar by the number of cells its
/// footprint covers.
#[derive(Debug)]
pub struct ProgressManager {
    bar: ProgressBar,
    tileset: Arc<Tileset>,
}

impl ProgressManager {
    /// Create a bar for a grid of `cell_count` cells
    pub fn new(tileset: Arc<Tileset>, cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, tileset }
    }

    /// Show which attempt is running and reset the count to the pre-placed cells
    pub fn start_attempt(&self, attempt: usize, seed: u64, preplaced: usize) {
        self.bar.set_message(format!("attempt {attempt} (seed {seed})"));
        self.bar.set_position(preplaced as u64);
    }

    /// Cells counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SynthesisObserver for ProgressManager {
    fn on_place_tile(&mut self, _position: GridPosition, possibility: Possibility) {
        let covered = self
            .tileset
            .tile(possibility.tile)
            .map_or(1, |tile| tile.rotated_footprint(possibility.rotation).volume());
        self.bar.inc(covered as u64);
    }

    fn on_finish(&mut self) {
        self.bar.set_message("done");
    }
}
