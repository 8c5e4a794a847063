//! rust_aztec - Aztec barcode detection and decoding
//!
//! A pure Rust reader for Aztec 2D barcodes, built on a general GF(2^m)
//! Reed-Solomon engine. Binary images go in, text and raw bytes come out.
//!
//! ```no_run
//! let matrix = rust_aztec::tools::load_bit_matrix("ticket.png").unwrap();
//! let code = rust_aztec::decode(&matrix).unwrap();
//! println!("{}", code.text);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment knobs and per-call decode options
pub mod config;
/// Aztec decoding modules (bit extraction, correction, text modes)
pub mod decoder;
/// Aztec detection modules (bullseye, orientation, sampling)
pub mod detector;
/// Error types shared across the crate
pub mod error;
/// Core data structures (BitMatrix, Point, AztecCode)
pub mod models;
/// Galois fields and Reed-Solomon error correction
pub mod reed_solomon;
/// Image file loading helpers
pub mod tools;
/// Utility functions (binarization, geometry)
pub mod utils;

pub use config::DecodeOptions;
pub use decoder::{AztecDecoder, CharacterSet, DecoderResult};
pub use detector::{AztecDetector, AztecDetectorResult};
pub use error::{AztecError, FormatError, GaloisError, ReedSolomonError, Result};
pub use models::{AztecCode, BitMatrix, Point};

use log::debug;
use rayon::prelude::*;

/// Detects and decodes one Aztec symbol per image
#[derive(Debug, Clone, Copy, Default)]
pub struct AztecReader {
    options: DecodeOptions,
}

impl AztecReader {
    /// Reader configured from the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with explicit options
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decode the symbol in `image`.
    ///
    /// The normal reading is tried first. When it fails and mirroring is
    /// enabled the symbol is read again as a mirror image; if that fails too
    /// the error from the first attempt is returned.
    pub fn decode(&self, image: &BitMatrix) -> Result<AztecCode> {
        let first = match self.attempt(image, false) {
            Ok(code) => return Ok(code),
            Err(e) => e,
        };
        if !self.options.try_mirrored {
            return Err(first);
        }
        debug!("AztecReader: normal read failed ({first}), trying mirrored");
        self.attempt(image, true).map_err(|_| first)
    }

    fn attempt(&self, image: &BitMatrix, mirror: bool) -> Result<AztecCode> {
        let detected = AztecDetector::new(image).detect(mirror)?;
        let decoded = AztecDecoder::with_charset(self.options.default_charset).decode(&detected)?;
        Ok(AztecCode::new(&detected, decoded, mirror))
    }
}

/// Decode the Aztec symbol in a binary image with default options
pub fn decode(image: &BitMatrix) -> Result<AztecCode> {
    AztecReader::new().decode(image)
}

/// Decode the Aztec symbol in a binary image
pub fn decode_with_options(image: &BitMatrix, options: DecodeOptions) -> Result<AztecCode> {
    AztecReader::with_options(options).decode(image)
}

/// Decode many images in parallel; results keep the input order
pub fn decode_batch(images: &[BitMatrix]) -> Vec<Result<AztecCode>> {
    let reader = AztecReader::new();
    images.par_iter().map(|image| reader.decode(image)).collect()
}
