//! Image preprocessing into darkness and residual fields

/// Decoding of raster buffers into a normalized darkness field
pub mod darkness;
/// Copy-on-branch residual field mutated by committed strands
pub mod residual;

pub use darkness::DarknessField;
pub use residual::ResidualField;
