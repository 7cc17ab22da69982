/// Points, distances and segment projections
pub mod geometry;
