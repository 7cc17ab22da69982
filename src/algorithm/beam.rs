//! Path hypotheses and top-k continuation selection
//!
//! Candidate continuations of every live hypothesis are pooled and ranked with a
//! total order: ranking key descending, then candidate peg, parent slot and origin
//! peg ascending. The order never depends on the order in which scores arrive.

use crate::algorithm::coverage::StrandCoverage;
use crate::algorithm::scoring::{StrandScore, commit_strand};
use crate::analysis::residual::ResidualField;
use std::cmp::Ordering;

/// One partial path under consideration by the beam
#[derive(Clone, Debug)]
pub struct PathHypothesis {
    /// Visited peg indices in order
    pub path: Vec<usize>,
    /// Residual removed by the strands of the path so far
    pub score: f64,
    /// Residual left after drawing the path
    pub residual: ResidualField,
}

impl PathHypothesis {
    /// Hypothesis without any peg, its first strand may start anywhere
    pub const fn empty(residual: ResidualField) -> Self {
        Self {
            path: Vec::new(),
            score: 0.0,
            residual,
        }
    }

    /// Hypothesis starting at `peg` with no strand drawn yet
    pub fn seeded(peg: usize, residual: ResidualField) -> Self {
        Self {
            path: vec![peg],
            score: 0.0,
            residual,
        }
    }

    /// Peg the next strand starts from
    pub fn last_peg(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Number of strands drawn
    pub const fn strand_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// New hypothesis extending this one with the strand of `continuation`
    ///
    /// The residual is cloned before the commit, so this hypothesis and its other
    /// branches keep their own fields. Rows the strand doesn't touch stay shared.
    #[must_use]
    pub fn branch(
        &self,
        continuation: &Continuation,
        coverage: &StrandCoverage,
        opacity: f64,
    ) -> Self {
        let mut residual = self.residual.clone();
        let removed = commit_strand(coverage, &mut residual, opacity);

        let mut path = Vec::with_capacity(self.path.len() + 2);
        path.extend_from_slice(&self.path);
        if path.is_empty() {
            path.push(continuation.from);
        }
        path.push(continuation.to);

        Self {
            path,
            score: self.score + removed,
            residual,
        }
    }
}

/// Scored strand extending a live hypothesis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Continuation {
    /// Beam slot of the hypothesis being extended
    pub parent: usize,
    /// Peg the strand starts from
    pub from: usize,
    /// Peg the strand ends at
    pub to: usize,
    /// Residual the strand removes from the parent's field
    pub score: StrandScore,
    /// Ranking key derived from `score`
    pub rank: f64,
}

/// Total order used to rank continuations, best first
pub fn compare_continuations(a: &Continuation, b: &Continuation) -> Ordering {
    b.rank
        .total_cmp(&a.rank)
        .then_with(|| a.to.cmp(&b.to))
        .then_with(|| a.parent.cmp(&b.parent))
        .then_with(|| a.from.cmp(&b.from))
}

/// Keep the `k` best continuations, sorted best first
pub fn select_top(mut candidates: Vec<Continuation>, k: usize) -> Vec<Continuation> {
    if k == 0 {
        return Vec::new();
    }
    if candidates.len() > k {
        candidates.select_nth_unstable_by(k - 1, compare_continuations);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(compare_continuations);
    candidates
}
