use super::poly::Polynomial;
use crate::error::GaloisError;
use std::fmt;
use std::sync::LazyLock;

/// GF(2^12) for 12-bit Aztec codewords: x^12 + x^6 + x^5 + x^3 + 1
pub static AZTEC_DATA_12: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b1_0000_0110_1001, 4096, 1));
/// GF(2^10) for 10-bit Aztec codewords: x^10 + x^3 + 1
pub static AZTEC_DATA_10: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b100_0000_1001, 1024, 1));
/// GF(2^6) for 6-bit Aztec codewords: x^6 + x + 1
pub static AZTEC_DATA_6: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b100_0011, 64, 1));
/// GF(2^4) protecting the Aztec mode message: x^4 + x + 1
pub static AZTEC_PARAM: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b1_0011, 16, 1));
/// GF(2^8) for 8-bit Aztec codewords: x^8 + x^5 + x^3 + x^2 + 1
pub static AZTEC_DATA_8: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b1_0010_1101, 256, 1));
/// GF(2^8) used by QR codes: x^8 + x^4 + x^3 + x^2 + 1, generator base 0
pub static QR_CODE_FIELD_256: LazyLock<GaloisField> =
    LazyLock::new(|| GaloisField::new(0b1_0001_1101, 256, 0));

pub use self::AZTEC_DATA_6 as MAXICODE_FIELD_64;
pub use self::AZTEC_DATA_8 as DATA_MATRIX_FIELD_256;

/// Finite field GF(2^m) backed by exponent and logarithm tables.
///
/// `generator_base` is the power of the primitive element that the first
/// root of the Reed-Solomon generator polynomial uses (`b` in `(x - a^b)`).
pub struct GaloisField {
    exp_table: Vec<u32>,
    log_table: Vec<u32>,
    size: usize,
    primitive: u32,
    generator_base: u32,
}

impl GaloisField {
    /// Build the tables for the field with the given primitive polynomial.
    ///
    /// `size` must be `2^m` where `m` is the degree of `primitive`.
    pub fn new(primitive: u32, size: usize, generator_base: u32) -> Self {
        let mut exp_table = vec![0u32; size];
        let mut log_table = vec![0u32; size];
        let mask = (size as u32).wrapping_sub(1);
        let mut x = 1u32;
        for slot in exp_table.iter_mut() {
            *slot = x;
            x <<= 1;
            if x as usize >= size {
                x ^= primitive;
                x &= mask;
            }
        }
        for (i, &value) in exp_table.iter().enumerate().take(size.saturating_sub(1)) {
            log_table[value as usize] = i as u32;
        }
        Self {
            exp_table,
            log_table,
            size,
            primitive,
            generator_base,
        }
    }

    /// Addition and subtraction are the same operation in GF(2^m)
    pub fn add_or_subtract(a: u32, b: u32) -> u32 {
        a ^ b
    }

    /// `alpha^a`
    pub fn exp(&self, a: usize) -> u32 {
        self.exp_table[a % (self.size - 1)]
    }

    /// Base-`alpha` logarithm of a nonzero element
    pub fn log(&self, a: u32) -> Result<usize, GaloisError> {
        if a == 0 {
            return Err(GaloisError::LogOfZero);
        }
        Ok(self.log_table[a as usize] as usize)
    }

    /// Multiplicative inverse of a nonzero element
    pub fn inverse(&self, a: u32) -> Result<u32, GaloisError> {
        if a == 0 {
            return Err(GaloisError::InverseOfZero);
        }
        let log = self.log_table[a as usize] as usize;
        Ok(self.exp_table[self.size - log - 1])
    }

    /// Product through the log tables; zero absorbs
    pub fn multiply(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = self.log_table[a as usize] + self.log_table[b as usize];
        self.exp_table[sum as usize % (self.size - 1)]
    }

    /// Number of elements, `2^m`
    pub fn size(&self) -> usize {
        self.size
    }

    /// Exponent of the first generator root
    pub fn generator_base(&self) -> u32 {
        self.generator_base
    }

    /// The zero polynomial over this field
    pub fn zero(&self) -> Polynomial<'_> {
        Polynomial::constant(self, 0)
    }

    /// The constant polynomial `1`
    pub fn one(&self) -> Polynomial<'_> {
        Polynomial::constant(self, 1)
    }

    /// `coefficient * x^degree`
    pub fn build_monomial(&self, degree: usize, coefficient: u32) -> Polynomial<'_> {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0u32; degree + 1];
        coefficients[0] = coefficient;
        Polynomial::from_raw(self, coefficients)
    }
}

impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.primitive == other.primitive
            && self.size == other.size
            && self.generator_base == other.generator_base
    }
}

impl Eq for GaloisField {}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(0x{:x},{})", self.primitive, self.size)
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_fields() -> [&'static GaloisField; 6] {
        [
            &*AZTEC_PARAM,
            &*AZTEC_DATA_6,
            &*AZTEC_DATA_8,
            &*AZTEC_DATA_10,
            &*AZTEC_DATA_12,
            &*QR_CODE_FIELD_256,
        ]
    }

    #[test]
    fn test_exp_log_are_inverse() {
        for field in all_fields() {
            for a in 1..field.size() as u32 {
                assert_eq!(field.exp(field.log(a).unwrap()), a, "{field}");
            }
            for i in 0..field.size() - 1 {
                assert_eq!(field.log(field.exp(i)).unwrap(), i, "{field}");
            }
        }
    }

    #[test]
    fn test_inverse() {
        for field in all_fields() {
            for a in 1..field.size() as u32 {
                let inv = field.inverse(a).unwrap();
                assert_eq!(field.multiply(a, inv), 1, "{field} a={a}");
            }
            assert_eq!(field.inverse(0), Err(GaloisError::InverseOfZero));
            assert_eq!(field.log(0), Err(GaloisError::LogOfZero));
        }
    }

    #[test]
    fn test_known_tables() {
        let expected = [1, 2, 4, 8, 3, 6, 12, 11, 5, 10, 7, 14, 15, 13, 9];
        for (i, &v) in expected.iter().enumerate() {
            assert_eq!(AZTEC_PARAM.exp(i), v);
        }
        assert_eq!(AZTEC_PARAM.exp(15), 1);
        let expected = [1, 2, 4, 8, 16, 32, 3, 6];
        for (i, &v) in expected.iter().enumerate() {
            assert_eq!(AZTEC_DATA_6.exp(i), v);
        }
        // 0x11D and 0x12D differ from alpha^8 on
        assert_eq!(QR_CODE_FIELD_256.exp(8), 0x1D);
        assert_eq!(DATA_MATRIX_FIELD_256.exp(8), 0x2D);
        assert_eq!(MAXICODE_FIELD_64.size(), 64);
    }

    #[test]
    fn test_multiply_and_add() {
        let field = &*AZTEC_DATA_8;
        assert_eq!(field.multiply(0, 77), 0);
        assert_eq!(field.multiply(77, 0), 0);
        assert_eq!(field.multiply(1, 77), 77);
        assert_eq!(field.multiply(2, 0x80), 0x2D);
        assert_eq!(GaloisField::add_or_subtract(0b1010, 0b0110), 0b1100);
    }

    #[test]
    fn test_build_monomial() {
        let field = &*AZTEC_DATA_10;
        let mono = field.build_monomial(3, 9);
        assert_eq!(mono.degree(), 3);
        assert_eq!(mono.coefficient(3), 9);
        assert_eq!(mono.coefficient(0), 0);
        assert!(field.build_monomial(5, 0).is_zero());
    }

    #[test]
    fn test_field_identity() {
        let custom = GaloisField::new(0b1_0011, 16, 1);
        assert_eq!(custom, *AZTEC_PARAM);
        assert_ne!(*AZTEC_DATA_8, *QR_CODE_FIELD_256);
        assert_eq!(format!("{:?}", *AZTEC_PARAM), "GF(0x13,16)");
    }
}
