//! Image processing helpers
//!
//! - Binarization (Otsu's method and fixed thresholds)
//! - Geometry (perspective transforms, rounding)

/// Otsu and fixed-threshold binarization
pub mod binarization;
/// Perspective transforms and rounding
pub mod geometry;
