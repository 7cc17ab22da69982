//! Evenly spaced peg coordinates along lines, rectangle perimeters and circles
//!
//! Every generator returns two equal-length sequences holding the x and y
//! coordinates. Fewer than two requested points yields empty sequences.

use crate::math::geometry::Point;
use std::f64::consts::TAU;

/// Minimum number of points a layout can be built from
pub const MIN_LAYOUT_POINTS: usize = 2;

/// Points linearly interpolated from `start` to `end`, both ends included
pub fn line_coords(start: (f64, f64), end: (f64, f64), count: usize) -> (Vec<f64>, Vec<f64>) {
    if count < MIN_LAYOUT_POINTS {
        return (Vec::new(), Vec::new());
    }

    let (start, end) = (Point::from(start), Point::from(end));
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let point = start.lerp(end, i as f64 / last);
            (point.x, point.y)
        })
        .unzip()
}

/// Points spaced by `perimeter / count` along a rectangle's border
///
/// The walk starts at `origin` (the top left corner) and runs along the top edge,
/// down the right edge, back along the bottom edge and up the left edge.
pub fn rectangle_coords(
    origin: (f64, f64),
    width: f64,
    height: f64,
    count: usize,
) -> (Vec<f64>, Vec<f64>) {
    let width = width.abs();
    let height = height.abs();
    let perimeter = 2.0 * (width + height);
    if count < MIN_LAYOUT_POINTS || perimeter <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let (x0, y0) = origin;
    let step = perimeter / count as f64;
    (0..count)
        .map(|i| {
            let mut travelled = i as f64 * step;
            if travelled < width {
                return (x0 + travelled, y0);
            }
            travelled -= width;
            if travelled < height {
                return (x0 + width, y0 + travelled);
            }
            travelled -= height;
            if travelled < width {
                return (x0 + width - travelled, y0 + height);
            }
            travelled -= width;
            (x0, y0 + height - travelled)
        })
        .unzip()
}

/// Points at equal angular increments around a circle, starting at angle 0
pub fn circle_coords(center: (f64, f64), radius: f64, count: usize) -> (Vec<f64>, Vec<f64>) {
    if count < MIN_LAYOUT_POINTS {
        return (Vec::new(), Vec::new());
    }

    let (cx, cy) = center;
    let increment = TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = i as f64 * increment;
            (radius.mul_add(angle.cos(), cx), radius.mul_add(angle.sin(), cy))
        })
        .unzip()
}
