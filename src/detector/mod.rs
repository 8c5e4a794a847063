//! Aztec symbol detection
//!
//! - `white_rectangle`: finds a dark region grown from a seed box
//! - `aztec_detector`: bullseye, orientation and mode message decoding
//! - `grid_sampler`: perspective sampling of the module grid

/// Bullseye and parameter detection
pub mod aztec_detector;
/// Perspective sampling of module grids
pub mod grid_sampler;
/// Dark-region corner finder
pub mod white_rectangle;

pub use aztec_detector::{AztecDetector, AztecDetectorResult};
pub use white_rectangle::WhiteRectangleDetector;
