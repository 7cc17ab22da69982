//! Rasterization of thickened strands into per-row pixel spans
//!
//! A pixel `(px, py)` is sampled at its integer coordinate and is covered when its
//! distance to the segment is at most half the stroke width. The half width never
//! drops below half a pixel, which keeps thin strands connected along their major
//! axis. The thickened segment is convex, so its intersection with any row is a
//! single contiguous span.

use crate::math::geometry::{Point, closest_x_on_row, distance_to_segment};

/// Smallest half width used for coverage, in pixels
pub const MIN_HALF_WIDTH: f64 = 0.5;

/// Run of covered pixels on a single row, both ends inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    /// Row index
    pub y: u32,
    /// First covered column
    pub x_start: u32,
    /// Last covered column
    pub x_end: u32,
}

impl RowSpan {
    /// Number of pixels in the span, at least one
    pub const fn width(&self) -> usize {
        (self.x_end - self.x_start) as usize + 1
    }
}

/// Pixels covered by one strand, in ascending row order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrandCoverage {
    spans: Vec<RowSpan>,
    pixel_count: usize,
}

impl StrandCoverage {
    /// Rasterize the segment `start..end` with the given stroke width
    ///
    /// Coverage is clipped to a `field_width` x `field_height` image.
    pub fn rasterize(
        start: Point,
        end: Point,
        stroke_width: f64,
        field_width: u32,
        field_height: u32,
    ) -> Self {
        if field_width == 0 || field_height == 0 {
            return Self::default();
        }

        let radius = (stroke_width / 2.0).max(MIN_HALF_WIDTH);
        let max_x = i64::from(field_width) - 1;
        let y_min = (start.y.min(end.y) - radius).floor().max(0.0);
        let y_max = (start.y.max(end.y) + radius)
            .ceil()
            .min(f64::from(field_height - 1));
        if y_min > y_max {
            return Self::default();
        }

        let mut spans = Vec::with_capacity((y_max - y_min) as usize + 1);
        let mut pixel_count = 0;

        for y in (y_min as u32)..=(y_max as u32) {
            let row_y = f64::from(y);
            let covered =
                |x: i64| distance_to_segment(Point::new(x as f64, row_y), start, end) <= radius;

            // Distance along a row is convex in x, so the nearest integers to the
            // closest approach decide whether the row is touched at all
            let closest = closest_x_on_row(start, end, row_y);
            let below = (closest.floor() as i64).clamp(0, max_x);
            let above = (closest.ceil() as i64).clamp(0, max_x);
            let seed = if covered(below) {
                below
            } else if covered(above) {
                above
            } else {
                continue;
            };

            let mut left = seed;
            while left > 0 && covered(left - 1) {
                left -= 1;
            }
            let mut right = seed;
            while right < max_x && covered(right + 1) {
                right += 1;
            }

            let span = RowSpan {
                y,
                x_start: left as u32,
                x_end: right as u32,
            };
            pixel_count += span.width();
            spans.push(span);
        }

        Self { spans, pixel_count }
    }

    /// Covered spans in ascending row order
    pub fn spans(&self) -> &[RowSpan] {
        &self.spans
    }

    /// Total number of covered pixels
    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Whether the strand covers no pixel of the image
    pub const fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Covered pixels as `(x, y)` pairs in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.spans
            .iter()
            .flat_map(|span| (span.x_start..=span.x_end).map(move |x| (x, span.y)))
    }
}
