pub mod pegs;
pub mod progress;
pub mod raster;
