/// Computed paths and their JSON form
pub mod blueprint;
/// Command-line interface and batch processing
pub mod cli;
/// Compile-time defaults and constants
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Peg layout files
pub mod pegs;
/// Progress bars for single runs and batches
pub mod progress;
/// Raster image rendering
pub mod raster;
/// SVG document rendering
pub mod svg;
