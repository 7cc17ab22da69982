//! Strand progress for single runs and batches of images

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display when processing several images
///
/// Shows one strand counter per image for small batches and adds a batch bar
/// counting finished images once there are more images than bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// (`filename`, `strands`, `max_strands`) for rolling window display
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static STRAND_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Strands: [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress bar counting the strands of a single search
///
/// A hidden bar accepts every update without drawing, so callers don't need to
/// branch on whether progress is shown.
pub fn iteration_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(STRAND_STYLE.clone());
    bar
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Batch mode once the rolling window can't show every file
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(Self::iteration_style());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress bar for a new image
    pub fn start_file(&mut self, index: usize, path: &Path, iterations: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, iterations);
        }
        self.update_bars();
    }

    /// Report the number of strands drawn so far
    pub fn update_iteration(&mut self, file_index: usize, strands: usize) {
        if let Some(state) = self.file_states.get_mut(file_index) {
            state.1 = strands;
        }
        self.update_bars();
    }

    /// Mark an image as completed and update batch progress
    ///
    /// The search may stop early, so the bar shows the strands actually drawn.
    pub fn complete_file(&mut self, index: usize, strands: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {} ({:.1}s)", state.0, elapsed.as_secs_f64());
            state.1 = strands;
            state.2 = strands;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Redraw the bars for the most recently started images
    fn update_bars(&self) {
        let started: Vec<&(String, usize, usize)> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        // Older images scroll out of the window
        let first = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let window = started.get(first..).unwrap_or(&[]);

        for (slot, bar) in self.file_bars.iter().enumerate() {
            if let Some((name, strands, max_strands)) = window.get(slot).copied() {
                bar.set_length(*max_strands as u64);
                bar.set_position(*strands as u64);
                let digits = max_strands.to_string().len();
                bar.set_message(format!("{strands:>digits$}/{max_strands}"));
                bar.set_prefix(name.clone());
            } else {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }

    fn iteration_style() -> ProgressStyle {
        PROGRESS_STYLE.clone()
    }
}
