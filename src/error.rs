//! Error taxonomy shared by the detector and the decoder.
//!
//! Field arithmetic and Reed-Solomon failures have their own types so that
//! callers can tell an uncorrectable codeword apart from a missing symbol.

use thiserror::Error;

/// Arithmetic failures inside a Galois field or on its polynomials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GaloisError {
    /// `log(0)` is undefined.
    #[error("logarithm of zero")]
    LogOfZero,
    /// Zero has no multiplicative inverse.
    #[error("inverse of zero")]
    InverseOfZero,
    /// Both operands must live in the same field.
    #[error("polynomials belong to different fields")]
    FieldMismatch,
    /// Division by the zero polynomial.
    #[error("divide by zero polynomial")]
    DivideByZero,
    /// A polynomial needs at least one coefficient.
    #[error("polynomial has no coefficients")]
    EmptyCoefficients,
}

/// Reed-Solomon encode/decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReedSolomonError {
    /// Error locator has a zero constant term.
    #[error("sigma tilde(0) was zero")]
    SigmaTildeZero,
    /// Euclidean remainder hit zero before reaching the target degree.
    #[error("r_{{i-1}} was zero")]
    PrematureZeroRemainder,
    /// Euclidean step did not lower the remainder degree.
    #[error("division algorithm failed to reduce polynomial")]
    DegreeNotReduced,
    /// Chien search found a different number of roots than the locator degree.
    #[error("error locator degree {expected} does not match {found} roots")]
    RootCountMismatch {
        /// Degree of the error locator.
        expected: usize,
        /// Roots actually found.
        found: usize,
    },
    /// A derived error position lies outside the received block.
    #[error("bad error location {0}")]
    BadErrorLocation(i64),
    /// Syndromes were nonzero but no error could be located.
    #[error("nonzero syndrome with no locatable errors")]
    NoErrorsLocated,
    /// `encode` called with zero error-correction codewords.
    #[error("no error correction codewords requested")]
    NoErrorCorrectionCodewords,
    /// `encode` called without room for data codewords.
    #[error("no data codewords to encode")]
    NoDataCodewords,
    /// Underlying field arithmetic failed.
    #[error(transparent)]
    Arithmetic(#[from] GaloisError),
}

/// Content of a located symbol violates the Aztec format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Data codewords could not be corrected.
    #[error("reed-solomon: {0}")]
    ReedSolomon(#[from] ReedSolomonError),
    /// The symbol holds fewer codewords than its parameters declare.
    #[error("symbol holds {available} codewords but declares {declared} data codewords")]
    TooFewCodewords {
        /// Codewords present in the symbol.
        available: usize,
        /// Data codewords declared by the mode message.
        declared: usize,
    },
    /// A data codeword of all zeros or all ones.
    #[error("reserved data codeword {0:#x}")]
    ReservedCodeword(u32),
    /// `FLG(7)` is reserved.
    #[error("illegal FLG(7) escape")]
    IllegalFlag,
    /// ECI digits are coded as 2..=11.
    #[error("invalid ECI digit code {0}")]
    InvalidEciDigit(u32),
    /// ECI value with no known character set.
    #[error("unsupported ECI value {0}")]
    UnknownEci(u32),
}

/// Top-level result of a detect or decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AztecError {
    /// No plausible symbol geometry in the image.
    #[error("no Aztec symbol found")]
    NotFound,
    /// Geometry was found but the content is malformed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    /// Reserved for symbologies with a separate checksum layer.
    #[error("checksum error")]
    Checksum,
}

impl AztecError {
    /// True when the failure came from Reed-Solomon correction of data codewords.
    pub fn is_reed_solomon(&self) -> bool {
        matches!(self, AztecError::Format(FormatError::ReedSolomon(_)))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AztecError>;
