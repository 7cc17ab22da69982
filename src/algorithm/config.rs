//! Yarn styles and path search configuration

use crate::io::configuration::{
    DEFAULT_BEAM_WIDTH, DEFAULT_DISPLAY_OPACITY, DEFAULT_DISPLAY_WIDTH,
    DEFAULT_EARLY_STOP_PATIENCE, DEFAULT_ITERATIONS, DEFAULT_SCORING_OPACITY,
    DEFAULT_SCORING_WIDTH, DEFAULT_SKIP_PEG_WITHIN, DEFAULT_START_PEG_RADIUS, DEFAULT_YARN_COLOR,
};
use crate::io::error::{Result, invalid_parameter};
use serde::{Deserialize, Serialize};

/// Stroke style of a strand
///
/// A run uses two independent styles: the scoring yarn inside [`PathConfig`], which
/// only simulates ink buildup during the search, and a display yarn passed to the
/// serializer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct YarnStyle {
    /// Stroke width in pixels
    pub width: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
    /// RGB color
    pub color: (u8, u8, u8),
}

impl Default for YarnStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_DISPLAY_WIDTH,
            opacity: DEFAULT_DISPLAY_OPACITY,
            color: DEFAULT_YARN_COLOR,
        }
    }
}

impl YarnStyle {
    /// Create a yarn style
    pub const fn new(width: f64, opacity: f64, color: (u8, u8, u8)) -> Self {
        Self {
            width,
            opacity,
            color,
        }
    }

    /// Style used to simulate ink during the search when none is given
    pub const fn scoring_default() -> Self {
        Self::new(DEFAULT_SCORING_WIDTH, DEFAULT_SCORING_OPACITY, DEFAULT_YARN_COLOR)
    }

    /// Check width and opacity ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not a positive finite number or the
    /// opacity lies outside `[0, 1]`
    pub fn validate(&self, parameter: &'static str) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(invalid_parameter(
                parameter,
                &self.width,
                &"yarn width must be a positive number",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(invalid_parameter(
                parameter,
                &self.opacity,
                &"yarn opacity must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Stop the search once improvement stalls
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EarlyStopConfig {
    /// Iterations whose best improvement is below this value count as stalled
    pub loss_threshold: Option<f64>,
    /// Consecutive stalled iterations tolerated before stopping
    pub patience: u32,
}

impl Default for EarlyStopConfig {
    fn default() -> Self {
        Self {
            loss_threshold: None,
            patience: DEFAULT_EARLY_STOP_PATIENCE,
        }
    }
}

/// Ranking key used to compare candidate strands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ScoreMode {
    /// Total residual removed by the strand
    #[default]
    Total,
    /// Residual removed per covered pixel, neutral to strand length
    Mean,
}

/// Path search configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Maximum number of strands
    pub iterations: usize,
    /// Yarn used to simulate ink buildup while scoring
    pub yarn: YarnStyle,
    /// Early stopping policy
    pub early_stop: EarlyStopConfig,
    /// Radius around pegs, in pixels, used to pick starting pegs (0 = any peg)
    pub start_peg_radius: u32,
    /// Don't connect pegs closer than this distance, in pixels
    pub skip_peg_within: u32,
    /// Number of path hypotheses kept per iteration (1 = greedy)
    pub beam_width: usize,
    /// Candidate ranking key
    pub score_mode: ScoreMode,
    /// Display a progress bar while running
    #[serde(skip)]
    pub progress_bar: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            yarn: YarnStyle::scoring_default(),
            early_stop: EarlyStopConfig::default(),
            start_peg_radius: DEFAULT_START_PEG_RADIUS,
            skip_peg_within: DEFAULT_SKIP_PEG_WITHIN,
            beam_width: DEFAULT_BEAM_WIDTH,
            score_mode: ScoreMode::default(),
            progress_bar: false,
        }
    }
}

impl PathConfig {
    /// Check every option against its allowed range
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The iteration budget, beam width or patience is zero
    /// - The early stop threshold is negative or not finite
    /// - The scoring yarn is invalid
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(invalid_parameter(
                "iterations",
                &self.iterations,
                &"at least one iteration is required",
            ));
        }
        if self.beam_width == 0 {
            return Err(invalid_parameter(
                "beam_width",
                &self.beam_width,
                &"beam width must be positive",
            ));
        }
        if self.early_stop.patience == 0 {
            return Err(invalid_parameter(
                "early_stop.patience",
                &self.early_stop.patience,
                &"patience must be positive",
            ));
        }
        if let Some(threshold) = self.early_stop.loss_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(invalid_parameter(
                    "early_stop.loss_threshold",
                    &threshold,
                    &"threshold must be a non-negative number",
                ));
            }
        }
        self.yarn.validate("yarn")
    }
}
