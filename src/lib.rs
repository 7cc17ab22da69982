//! String art generation: a strand path between pegs that reproduces an image
//!
//! The target image becomes a darkness field. A beam search then lays one strand per
//! iteration between pegs, scoring every candidate by how much remaining darkness it
//! would cover, and the winning peg sequence is rendered as an SVG document.

#![forbid(unsafe_code)]

/// Strand coverage, scoring and the beam search over peg sequences
pub mod algorithm;
/// Image preprocessing into darkness and residual fields
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Planar geometry shared by layouts and rasterization
pub mod math;
/// Pegs and peg layout generation
pub mod spatial;

pub use algorithm::config::{EarlyStopConfig, PathConfig, ScoreMode, YarnStyle};
pub use algorithm::executor::{compute_blueprint, compute_svg};
pub use io::blueprint::Blueprint;
pub use io::error::{Result, StrandError};
pub use io::svg::RenderOptions;
pub use spatial::Peg;
pub use spatial::layout::{circle_coords, line_coords, rectangle_coords};
