use crate::spatial::Peg;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size set of peg indices
///
/// Used as the candidate mask for the next strand of a path. Provides O(1)
/// membership testing and ascending iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PegMask {
    bits: BitVec,
}

impl PegMask {
    /// Create a mask with no pegs present
    pub fn new(peg_count: usize) -> Self {
        Self {
            bits: bitvec![0; peg_count],
        }
    }

    /// Create a mask containing every peg
    pub fn all(peg_count: usize) -> Self {
        Self {
            bits: bitvec![1; peg_count],
        }
    }

    /// Insert a peg index, ignoring indices outside the layout
    pub fn insert(&mut self, peg: usize) {
        if peg < self.bits.len() {
            self.bits.set(peg, true);
        }
    }

    /// Test peg membership
    pub fn contains(&self, peg: usize) -> bool {
        self.bits.get(peg).as_deref() == Some(&true)
    }

    /// Test if no pegs are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count pegs in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Peg indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for PegMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PegMask({} pegs: {:?})",
            self.count(),
            self.iter().collect::<Vec<_>>()
        )
    }
}

/// Whether a strand `from -> to` may extend a path whose previous peg is `previous`
///
/// A strand may not be degenerate, may not immediately retrace the strand before
/// it and may not join pegs closer than `skip_within` pixels.
pub fn is_allowed(
    pegs: &[Peg],
    from: usize,
    to: usize,
    previous: Option<usize>,
    skip_within: u32,
) -> bool {
    if from == to || previous == Some(to) {
        return false;
    }
    match (pegs.get(from), pegs.get(to)) {
        (Some(start), Some(end)) => start.distance(end) >= f64::from(skip_within),
        _ => false,
    }
}

/// Pegs that may follow the last peg of `path`
///
/// An empty path has no constraint yet, so every peg is a candidate.
pub fn candidate_mask(pegs: &[Peg], path: &[usize], skip_within: u32) -> PegMask {
    let Some(&last) = path.last() else {
        return PegMask::all(pegs.len());
    };
    let previous = path.len().checked_sub(2).and_then(|i| path.get(i)).copied();

    let mut mask = PegMask::new(pegs.len());
    for to in 0..pegs.len() {
        if is_allowed(pegs, last, to, previous, skip_within) {
            mask.insert(to);
        }
    }
    mask
}
