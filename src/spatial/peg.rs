//! Peg anchors, jitter and distance helpers

use crate::math::geometry::Point;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Fixed anchor point between which strands are drawn
///
/// The `id` is the peg's stable index into the caller-supplied sequence. Pegs are
/// plain values: jittering or clamping produces a new peg with the same id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    /// Stable identity, the index of the peg in its layout
    pub id: usize,
    /// Horizontal coordinate, (0, 0) is the top left corner of the image
    pub x: f64,
    /// Vertical coordinate, (0, 0) is the top left corner of the image
    pub y: f64,
}

impl Peg {
    /// Create a peg
    pub const fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Coordinates as a geometric point
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance to another peg, in pixels
    pub fn distance(&self, other: &Self) -> f64 {
        self.point().distance(other.point())
    }

    /// Whether both coordinates are finite numbers
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Copy of the peg with coordinates clamped to the pixel bounds of an image
    #[must_use]
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let max_x = f64::from(width.saturating_sub(1));
        let max_y = f64::from(height.saturating_sub(1));
        Self {
            id: self.id,
            x: self.x.clamp(0.0, max_x),
            y: self.y.clamp(0.0, max_y),
        }
    }

    /// Copy of the peg offset by up to `amount` pixels on each axis
    ///
    /// The offset is drawn uniformly from `[-amount, amount]`. Non-positive amounts
    /// return the peg unchanged without consuming randomness.
    #[must_use]
    pub fn with_jitter<R: Rng + ?Sized>(&self, amount: f64, rng: &mut R) -> Self {
        if amount <= 0.0 || !amount.is_finite() {
            return *self;
        }
        Self {
            id: self.id,
            x: self.x + rng.random_range(-amount..=amount),
            y: self.y + rng.random_range(-amount..=amount),
        }
    }
}

/// Number a pair of coordinate sequences into pegs
///
/// Peg ids follow the order of the coordinates. Extra values in the longer sequence
/// are ignored.
pub fn pegs_from_coords((xs, ys): (Vec<f64>, Vec<f64>)) -> Vec<Peg> {
    xs.into_iter()
        .zip(ys)
        .enumerate()
        .map(|(id, (x, y))| Peg::new(id, x, y))
        .collect()
}

/// Jitter every peg of a layout with a seeded generator
///
/// The same seed always yields the same jittered layout.
pub fn jitter_pegs(pegs: &[Peg], amount: f64, seed: u64) -> Vec<Peg> {
    let mut rng = StdRng::seed_from_u64(seed);
    pegs.iter()
        .map(|peg| peg.with_jitter(amount, &mut rng))
        .collect()
}
