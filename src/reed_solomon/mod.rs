//! Galois-field arithmetic and Reed-Solomon error correction
//!
//! - `galois`: GF(2^m) tables and the shared field constants
//! - `poly`: immutable polynomials over a field
//! - `decoder` / `encoder`: syndrome decoding and check codeword generation

/// Syndrome decoding
pub mod decoder;
/// Check codeword generation
pub mod encoder;
/// Field arithmetic and shared fields
pub mod galois;
/// Polynomials over a field
pub mod poly;

pub use decoder::ReedSolomonDecoder;
pub use encoder::ReedSolomonEncoder;
pub use galois::{
    AZTEC_DATA_6, AZTEC_DATA_8, AZTEC_DATA_10, AZTEC_DATA_12, AZTEC_PARAM, DATA_MATRIX_FIELD_256,
    GaloisField, MAXICODE_FIELD_64, QR_CODE_FIELD_256,
};
pub use poly::Polynomial;
