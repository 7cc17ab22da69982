//! Strand scoring and committing against a residual field
//!
//! Scoring and committing walk the same spans with the same per-pixel blend, so
//! the reduction a candidate is ranked by is exactly the reduction applied when it
//! is committed.

use crate::algorithm::config::ScoreMode;
use crate::algorithm::coverage::StrandCoverage;
use crate::analysis::residual::ResidualField;

/// Residual left at a pixel after one strand of the given opacity crosses it
///
/// Ink builds up multiplicatively: a strand removes `opacity` of what is left, so
/// the residual shrinks toward zero and never goes negative.
pub fn blend(residual: f32, opacity: f32) -> f32 {
    (residual * (1.0 - opacity)).max(0.0)
}

/// How much residual a strand removes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrandScore {
    /// Residual removed, summed over covered pixels
    pub reduction: f64,
    /// Covered pixels
    pub pixels: usize,
}

impl StrandScore {
    /// Key candidates are ranked by, higher is better
    pub fn ranking(&self, mode: ScoreMode) -> f64 {
        match mode {
            ScoreMode::Total => self.reduction,
            ScoreMode::Mean if self.pixels == 0 => 0.0,
            ScoreMode::Mean => self.reduction / self.pixels as f64,
        }
    }
}

/// Residual a strand would remove from `field`, without modifying it
pub fn score_strand(coverage: &StrandCoverage, field: &ResidualField, opacity: f64) -> StrandScore {
    let opacity = opacity as f32;
    let mut reduction = 0.0;
    for span in coverage.spans() {
        let Some(row) = field.row(span.y) else {
            continue;
        };
        let Some(pixels) = row.get(span.x_start as usize..=span.x_end as usize) else {
            continue;
        };
        reduction += pixels
            .iter()
            .map(|&residual| f64::from(residual - blend(residual, opacity)))
            .sum::<f64>();
    }

    StrandScore {
        reduction,
        pixels: coverage.pixel_count(),
    }
}

/// Apply a strand to `field` and return the residual it removed
///
/// The returned value equals [`score_strand`] on the field before the call.
pub fn commit_strand(coverage: &StrandCoverage, field: &mut ResidualField, opacity: f64) -> f64 {
    let opacity = opacity as f32;
    let mut reduction = 0.0;
    for span in coverage.spans() {
        let Some(row) = field.row_mut(span.y) else {
            continue;
        };
        let Some(pixels) = row.get_mut(span.x_start as usize..=span.x_end as usize) else {
            continue;
        };
        reduction += pixels
            .iter_mut()
            .map(|residual| {
                let blended = blend(*residual, opacity);
                let removed = f64::from(*residual - blended);
                *residual = blended;
                removed
            })
            .sum::<f64>();
    }
    reduction
}
