/// Assembled decode result
pub mod aztec_code;
/// Packed binary matrix
pub mod matrix;
/// Float and integer points
pub mod point;

pub use aztec_code::AztecCode;
pub use matrix::BitMatrix;
pub use point::{Point, PointI};
