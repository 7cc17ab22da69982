//! Remaining darkness per pixel with copy-on-branch row sharing
//!
//! Beam hypotheses diverge after every iteration, so each one logically owns its
//! own residual field. Rows are reference counted: cloning a field only clones the
//! row handles, and a row is duplicated the first time a clone writes to it. A
//! strand touches a small band of rows, so siblings keep sharing everything else.

use std::sync::Arc;

/// Per-pixel target darkness not yet accounted for by committed strands
#[derive(Clone, Debug)]
pub struct ResidualField {
    width: u32,
    rows: Vec<Arc<Vec<f32>>>,
}

impl ResidualField {
    /// Build a field from row-major values
    ///
    /// Rows shorter or longer than `width` are padded with zeros or truncated.
    pub fn from_rows(width: u32, rows: Vec<Vec<f32>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width as usize, 0.0);
                Arc::new(row)
            })
            .collect();
        Self { width, rows }
    }

    /// Field width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height in pixels
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Residual at a pixel, `None` outside the field
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.row(y)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Read access to one row
    pub fn row(&self, y: u32) -> Option<&[f32]> {
        self.rows.get(y as usize).map(|row| row.as_slice())
    }

    /// Write access to one row, detaching it from any clone sharing it
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [f32]> {
        self.rows
            .get_mut(y as usize)
            .map(|row| Arc::make_mut(row).as_mut_slice())
    }

    /// Sum of the residual over the whole field
    pub fn total(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|&value| f64::from(value))
            .sum()
    }

    /// Number of rows still physically shared with another field
    pub fn shared_rows(&self, other: &Self) -> usize {
        self.rows
            .iter()
            .zip(&other.rows)
            .filter(|(mine, theirs)| Arc::ptr_eq(mine, theirs))
            .count()
    }
}
