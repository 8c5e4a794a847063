use super::galois::GaloisField;
use super::poly::Polynomial;
use crate::error::ReedSolomonError;

/// Reed-Solomon check codeword generator.
///
/// Generator polynomials are cached by degree and only ever grow, so an
/// encoder reused across blocks pays for each degree once.
pub struct ReedSolomonEncoder<'f> {
    field: &'f GaloisField,
    cached_generators: Vec<Polynomial<'f>>,
}

impl<'f> ReedSolomonEncoder<'f> {
    /// Encoder over `field`
    pub fn new(field: &'f GaloisField) -> Self {
        Self {
            field,
            cached_generators: vec![field.one()],
        }
    }

    fn extend_generators(&mut self, degree: usize) -> Result<(), ReedSolomonError> {
        let base = self.field.generator_base() as usize;
        while self.cached_generators.len() <= degree {
            let d = self.cached_generators.len();
            let root = Polynomial::new(self.field, &[1, self.field.exp(d - 1 + base)])?;
            let next = self.cached_generators[d - 1].multiply(&root)?;
            self.cached_generators.push(next);
        }
        Ok(())
    }

    /// Fill the last `ec_count` slots of `to_encode` with check codewords for
    /// the data in front of them.
    pub fn encode(&mut self, to_encode: &mut [u32], ec_count: usize) -> Result<(), ReedSolomonError> {
        if ec_count == 0 {
            return Err(ReedSolomonError::NoErrorCorrectionCodewords);
        }
        let data_count = match to_encode.len().checked_sub(ec_count) {
            Some(n) if n > 0 => n,
            _ => return Err(ReedSolomonError::NoDataCodewords),
        };
        self.extend_generators(ec_count)?;
        let generator = &self.cached_generators[ec_count];

        let info = Polynomial::new(self.field, &to_encode[..data_count])?
            .multiply_by_monomial(ec_count, 1);
        let (_, remainder) = info.divide(generator)?;
        let coefficients = remainder.coefficients();
        let num_zero = ec_count - coefficients.len();
        let (zeros, check) = to_encode[data_count..].split_at_mut(num_zero);
        zeros.fill(0);
        check.copy_from_slice(coefficients);
        Ok(())
    }
}
