//! Aztec decoding modules
//!
//! Everything that happens after a symbol has been located and sampled:
//! - Reading data layers off the module grid
//! - Codeword error correction and bit unstuffing
//! - Mode tables and the high-level text decoder
//! - ECI character sets

/// Main Aztec decoder that orchestrates the decoding pipeline
pub mod aztec_decoder;
/// Layer-by-layer bit extraction and the reference grid map
pub mod bit_extraction;
/// Codeword grouping, Reed-Solomon correction and unstuffing
pub mod correction;
/// ECI character sets
pub mod eci;
/// Latch/shift state machine producing text
pub mod high_level;
/// Character tables for the five text modes
pub mod tables;

pub use aztec_decoder::{AztecDecoder, DecoderResult};
pub use eci::CharacterSet;
