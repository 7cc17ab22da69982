//! Stall detection for the path search

use crate::algorithm::config::EarlyStopConfig;
use crate::io::configuration::NEGLIGIBLE_IMPROVEMENT;
use log::debug;

/// What the search should do with the iteration just scored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopDecision {
    /// Commit the iteration and keep searching
    Continue,
    /// Commit the iteration, then stop
    AfterCommit,
    /// Stop without committing the iteration
    Now,
}

/// Decides when improvement has dried up
///
/// Falling below the loss threshold ends the search on that iteration. With a
/// patience of 1 the iteration is dropped, otherwise its strand is still drawn.
/// Negligible improvements are counted separately and end the search after
/// `patience` consecutive occurrences.
#[derive(Clone, Copy, Debug)]
pub struct EarlyStopper {
    config: EarlyStopConfig,
    stalled: u32,
}

impl EarlyStopper {
    /// Create a tracker with no stalled iterations
    pub const fn new(config: EarlyStopConfig) -> Self {
        Self { config, stalled: 0 }
    }

    /// Whether an improvement is below the configured loss threshold
    pub fn below_threshold(&self, improvement: f64) -> bool {
        self.config
            .loss_threshold
            .is_some_and(|threshold| improvement < threshold)
    }

    /// Whether an improvement is too small to count at all
    pub const fn is_negligible(improvement: f64) -> bool {
        improvement <= NEGLIGIBLE_IMPROVEMENT
    }

    /// Record an iteration's best improvement
    pub fn observe(&mut self, improvement: f64) -> StopDecision {
        if self.below_threshold(improvement) {
            debug!(
                "Improvement {improvement:.3e} below threshold {:?}",
                self.config.loss_threshold
            );
            return if self.config.patience <= 1 {
                StopDecision::Now
            } else {
                StopDecision::AfterCommit
            };
        }

        if !Self::is_negligible(improvement) {
            self.stalled = 0;
            return StopDecision::Continue;
        }

        self.stalled += 1;
        debug!(
            "Stalled iteration {}/{} (improvement {improvement:.3e})",
            self.stalled, self.config.patience
        );
        if self.stalled >= self.config.patience {
            StopDecision::Now
        } else {
            StopDecision::Continue
        }
    }

    /// Consecutive negligible iterations seen so far
    pub const fn stalled_iterations(&self) -> u32 {
        self.stalled
    }
}
