//! Peg values and peg layout generation
//!
//! This module contains the leaf geometry of the engine:
//! - Peg anchors with clamping and jitter
//! - Evenly spaced layouts along lines, rectangles and circles

/// Evenly spaced peg coordinate generators
pub mod layout;
/// Peg anchors and peg sequence helpers
pub mod peg;

pub use peg::Peg;
