//! Engine constants and runtime configuration defaults

// Default values for configurable parameters
/// Default number of strands to lay down
pub const DEFAULT_ITERATIONS: usize = 4000;

/// Default beam width (1 is pure greedy)
pub const DEFAULT_BEAM_WIDTH: usize = 1;

/// Fixed seed for reproducible peg jitter
pub const DEFAULT_SEED: u64 = 42;

/// Default number of pegs in a generated layout
pub const DEFAULT_PEG_COUNT: usize = 288;

/// Default margin between the peg layout and the image edge, as a fraction of the image size
pub const DEFAULT_PEG_MARGIN: f64 = 0.05;

/// Default radius around pegs used to pick the starting peg, in pixels
pub const DEFAULT_START_PEG_RADIUS: u32 = 5;

/// Default minimum distance between consecutive pegs, in pixels
pub const DEFAULT_SKIP_PEG_WITHIN: u32 = 0;

/// Default consecutive stalled iterations tolerated before stopping
pub const DEFAULT_EARLY_STOP_PATIENCE: u32 = 100;

// Scoring yarn: low opacity encourages strands to overlap
/// Default stroke width used when simulating ink during the search
pub const DEFAULT_SCORING_WIDTH: f64 = 2.0;
/// Default opacity used when simulating ink during the search
pub const DEFAULT_SCORING_OPACITY: f64 = 0.1;

// Display yarn
/// Default stroke width of the rendered strands
pub const DEFAULT_DISPLAY_WIDTH: f64 = 1.0;
/// Default opacity of the rendered strands
pub const DEFAULT_DISPLAY_OPACITY: f64 = 0.2;
/// Default strand color
pub const DEFAULT_YARN_COLOR: (u8, u8, u8) = (0, 0, 0);

/// Default background color of rendered documents
pub const DEFAULT_BACKGROUND: (u8, u8, u8) = (255, 255, 255);

/// Improvements at or below this value count as no improvement
pub const NEGLIGIBLE_IMPROVEMENT: f64 = 1e-9;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_strands";
/// Suffix added to blueprint filenames
pub const BLUEPRINT_SUFFIX: &str = "_blueprint";
/// Image extensions picked up when the target is a directory
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
