/// Beam hypotheses and continuation ranking
pub mod beam;
/// Memoized strand coverage per peg pair
pub mod cache;
/// Yarn styles and search configuration
pub mod config;
/// Strand rasterization into row spans
pub mod coverage;
/// Stall tracking for early termination
pub mod early_stop;
/// Candidate peg masks and the skip-within rule
pub mod eligibility;
/// Beam search executor and the top-level compute entry points
pub mod executor;
/// Strand scoring and committing against the residual field
pub mod scoring;
