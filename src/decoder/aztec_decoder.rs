//! Aztec decoder - wires bit extraction, error correction and text decoding
//! together for a detected symbol.

use super::bit_extraction::extract_bits;
use super::correction::correct_bits;
use super::eci::CharacterSet;
use super::high_level::decode_high_level;
use crate::detector::AztecDetectorResult;
use crate::error::Result;
use log::debug;

/// Content of a decoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderResult {
    /// Decoded text
    pub text: String,
    /// Corrected data bits packed MSB first, last byte padded with zeros
    pub raw_bytes: Vec<u8>,
    /// Number of meaningful bits in `raw_bytes`
    pub num_bits: usize,
    /// Share of check codewords, e.g. `"70%"`
    pub ec_level: String,
    /// Data codewords repaired by Reed-Solomon
    pub errors_corrected: usize,
}

/// Decodes the module grid of a detected symbol
#[derive(Debug, Clone, Copy, Default)]
pub struct AztecDecoder {
    charset: CharacterSet,
}

impl AztecDecoder {
    /// Decoder that reads bytes as ISO-8859-1 until an ECI says otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with a different initial character set
    pub fn with_charset(charset: CharacterSet) -> Self {
        Self { charset }
    }

    /// Read, correct and decode the data layers of `detected`
    pub fn decode(&self, detected: &AztecDetectorResult) -> Result<DecoderResult> {
        let raw = extract_bits(&detected.bits, detected.compact, detected.layers);
        let corrected = correct_bits(&raw, detected.layers, detected.data_blocks)?;
        let text = decode_high_level(&corrected.bits, self.charset)?;
        debug!(
            "AztecDecoder: {} layers, {} data bits, {} corrected",
            detected.layers,
            corrected.bits.len(),
            corrected.errors_corrected
        );

        Ok(DecoderResult {
            text,
            raw_bytes: bits_to_bytes(&corrected.bits),
            num_bits: corrected.bits.len(),
            ec_level: format!("{}%", corrected.ec_level),
            errors_corrected: corrected.errors_corrected,
        })
    }
}

/// Pack bits MSB first into bytes
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AztecError, FormatError};
    use crate::models::{BitMatrix, Point};

    fn detected(text: &str, compact: bool, layers: usize, data_blocks: usize) -> AztecDetectorResult {
        AztecDetectorResult {
            bits: BitMatrix::parse(text, "X", ".").unwrap(),
            points: [Point::new(0.0, 0.0); 4],
            compact,
            layers,
            data_blocks,
            errors_corrected: 0,
        }
    }

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes(&[]), Vec::<u8>::new());
        assert_eq!(bits_to_bytes(&[true]), vec![0x80]);
        let bits: Vec<bool> = [1, 1, 1, 0, 0, 0, 1, 0, 0, 1].iter().map(|&b| b == 1).collect();
        assert_eq!(bits_to_bytes(&bits), vec![0xe2, 0x40]);
    }

    #[test]
    fn test_decode_compact_symbol() {
        let symbol = detected(
            include_str!("../../tests/fixtures/compact_1_layer.txt"),
            true,
            1,
            5,
        );
        let result = AztecDecoder::new().decode(&symbol).unwrap();
        assert_eq!(result.text, "hello");
        assert_eq!(result.raw_bytes, vec![226, 76, 214, 192]);
        assert_eq!(result.num_bits, 30);
        assert_eq!(result.ec_level, "70%");
        assert_eq!(result.errors_corrected, 0);
    }

    #[test]
    fn test_decode_repairs_damaged_modules() {
        let mut symbol = detected(
            include_str!("../../tests/fixtures/full_2_layers.txt"),
            false,
            2,
            10,
        );
        // two modules of the outer layer's left band
        symbol.bits.toggle(0, 0);
        symbol.bits.toggle(1, 5);
        let result = AztecDecoder::new().decode(&symbol).unwrap();
        assert_eq!(result.text, "Aztec 2024");
        assert_eq!(result.ec_level, "79%");
        assert_eq!(result.errors_corrected, 2);
    }

    #[test]
    fn test_declared_blocks_beyond_capacity() {
        let symbol = detected(
            include_str!("../../tests/fixtures/compact_1_layer.txt"),
            true,
            1,
            18,
        );
        assert_eq!(
            AztecDecoder::new().decode(&symbol),
            Err(AztecError::Format(FormatError::TooFewCodewords {
                available: 17,
                declared: 18
            }))
        );
    }
}
