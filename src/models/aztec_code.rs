use super::Point;
use crate::decoder::DecoderResult;
use crate::detector::AztecDetectorResult;

/// A decoded Aztec symbol
#[derive(Debug, Clone, PartialEq)]
pub struct AztecCode {
    /// Decoded text
    pub text: String,
    /// Corrected data bits, MSB first
    pub raw_bytes: Vec<u8>,
    /// Meaningful bits in `raw_bytes`
    pub num_bits: usize,
    /// Share of check codewords, e.g. `"70%"`
    pub ec_level: String,
    /// Symbols repaired in the mode message and the data codewords together
    pub errors_corrected: usize,
    /// Compact (5 ring) or full (7 ring) symbol
    pub compact: bool,
    /// Data layers
    pub layers: usize,
    /// Data codewords
    pub data_blocks: usize,
    /// Outer corners in image coordinates: top-left, top-right,
    /// bottom-right, bottom-left of the symbol
    pub points: [Point; 4],
    /// The symbol was read as a mirror image
    pub mirrored: bool,
}

impl AztecCode {
    /// Combine detection and decoding output
    pub fn new(detected: &AztecDetectorResult, decoded: DecoderResult, mirrored: bool) -> Self {
        Self {
            text: decoded.text,
            raw_bytes: decoded.raw_bytes,
            num_bits: decoded.num_bits,
            ec_level: decoded.ec_level,
            errors_corrected: detected.errors_corrected + decoded.errors_corrected,
            compact: detected.compact,
            layers: detected.layers,
            data_blocks: detected.data_blocks,
            points: detected.points,
            mirrored,
        }
    }
}
