//! Multi-map progress tracking with automatic batching for large runs

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for a run of several maps
///
/// Automatically switches between individual progress bars (for few maps)
/// and an additional batch progress bar (for many maps) based on map count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    map_bars: Vec<ProgressBar>,
    map_count: usize,
    /// Stores (`label`, `collapsed_cells`, `total_cells`) for rolling window display
    map_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self::with_target(MultiProgress::new())
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self::with_target(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    fn with_target(multi_progress: MultiProgress) -> Self {
        Self {
            multi_progress,
            batch_bar: None,
            map_bars: Vec::new(),
            map_count: 0,
            map_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on map count
    pub fn initialize(&mut self, map_count: usize) {
        self.map_count = map_count;

        // Switch to batch mode for many maps to avoid terminal spam
        if map_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(map_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = map_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.map_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress bar for a new map
    pub fn start_map(&mut self, index: usize, label: &str, total_cells: usize) {
        if index >= self.map_states.len() {
            self.map_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.map_states.get_mut(index) {
            *state = (label.to_string(), 0, total_cells);
        }
        self.update_bars();
    }

    /// Report how many cells of a map are collapsed
    pub fn update_map(&mut self, index: usize, collapsed_cells: usize) {
        if let Some(state) = self.map_states.get_mut(index) {
            state.1 = collapsed_cells;
        }
        self.update_bars();
    }

    /// Mark a map as finished and update batch progress
    pub fn complete_map(&mut self, index: usize, succeeded: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.map_states.get_mut(index) {
            let mark = if succeeded { '✓' } else { '✗' };
            state.0 = format!("{mark} {}", state.0);
            if succeeded {
                state.1 = state.2;
            }
        }
        self.update_bars();
    }

    /// Number of maps the manager was initialized for
    pub const fn map_count(&self) -> usize {
        self.map_count
    }

    /// Labels and progress of the maps currently shown, oldest first
    pub fn visible_maps(&self) -> Vec<(String, usize, usize)> {
        let active: Vec<_> = self
            .map_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .cloned()
            .collect();
        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        active.get(start_idx..).unwrap_or(&[]).to_vec()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All maps processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active maps
    fn update_bars(&self) {
        let visible_maps = self.visible_maps();

        for (bar_idx, (label, current, max)) in visible_maps.iter().enumerate() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(label.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible_maps.len()..self.map_bars.len() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
