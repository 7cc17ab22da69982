//! Planar geometry helpers shared by peg layouts and strand rasterization

/// Point in continuous image pixel space, (0, 0) is the top left pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: t.mul_add(other.x - self.x, self.x),
            y: t.mul_add(other.y - self.y, self.y),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Shortest distance from `point` to the closed segment `start..end`
///
/// Degenerate segments collapse to the distance to `start`.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx.mul_add(dx, dy * dy);
    if length_sq <= f64::EPSILON {
        return point.distance(start);
    }

    let t = ((point.x - start.x).mul_add(dx, (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(start.lerp(end, t))
}

/// Horizontal position where the segment passes closest to the row `y`
///
/// For rows crossed by the segment this is the intersection; for rows outside its
/// vertical extent it is the x of the nearer endpoint. Horizontal segments return the
/// projection clamped to the segment, which for any `x` in the span is equally close.
pub fn closest_x_on_row(start: Point, end: Point, y: f64) -> f64 {
    let (top, bottom) = if start.y <= end.y {
        (start, end)
    } else {
        (end, start)
    };

    if y <= top.y {
        return top.x;
    }
    if y >= bottom.y {
        return bottom.x;
    }

    let t = (y - top.y) / (bottom.y - top.y);
    top.lerp(bottom, t).x
}
