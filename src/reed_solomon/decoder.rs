use super::galois::GaloisField;
use super::poly::Polynomial;
use crate::error::ReedSolomonError;

/// Syndrome-based Reed-Solomon decoder.
///
/// Finds the error locator with the extended Euclidean algorithm, the error
/// positions with a Chien search and the magnitudes with Forney's formula.
/// Holds no state besides the field, so one decoder can serve any number of
/// blocks.
pub struct ReedSolomonDecoder<'f> {
    field: &'f GaloisField,
}

impl<'f> ReedSolomonDecoder<'f> {
    /// Decoder over `field`
    pub fn new(field: &'f GaloisField) -> Self {
        Self { field }
    }

    /// Correct `received` in place.
    ///
    /// `two_s` is the number of error-correction codewords at the end of the
    /// block. Up to `two_s / 2` symbol errors are repaired. Returns how many
    /// codewords were changed.
    pub fn decode(&self, received: &mut [u32], two_s: usize) -> Result<usize, ReedSolomonError> {
        let poly = Polynomial::new(self.field, received)?;
        let base = self.field.generator_base() as usize;

        let mut syndrome_coefficients = vec![0u32; two_s];
        let mut no_error = true;
        for i in 0..two_s {
            let eval = poly.evaluate_at(self.field.exp(i + base));
            syndrome_coefficients[two_s - 1 - i] = eval;
            if eval != 0 {
                no_error = false;
            }
        }
        if no_error {
            return Ok(0);
        }

        let syndrome = Polynomial::new(self.field, &syndrome_coefficients)?;
        let (sigma, omega) =
            self.run_euclidean_algorithm(self.field.build_monomial(two_s, 1), syndrome, two_s)?;
        let error_locations = self.find_error_locations(&sigma)?;
        let error_magnitudes = self.find_error_magnitudes(&omega, &error_locations)?;

        // Every position is checked before `received` is touched
        let mut positions = Vec::with_capacity(error_locations.len());
        for &location in &error_locations {
            let position = received.len() as i64 - 1 - self.field.log(location)? as i64;
            if position < 0 {
                return Err(ReedSolomonError::BadErrorLocation(position));
            }
            positions.push(position as usize);
        }
        for (position, &magnitude) in positions.into_iter().zip(&error_magnitudes) {
            let slot = &mut received[position];
            *slot = GaloisField::add_or_subtract(*slot, magnitude);
        }
        Ok(error_locations.len())
    }

    /// Returns `(sigma, omega)`, the error locator and error evaluator
    fn run_euclidean_algorithm(
        &self,
        a: Polynomial<'f>,
        b: Polynomial<'f>,
        r_degree: usize,
    ) -> Result<(Polynomial<'f>, Polynomial<'f>), ReedSolomonError> {
        let (mut r_last, mut r) = if a.degree() < b.degree() {
            (b, a)
        } else {
            (a, b)
        };
        let mut t_last = self.field.zero();
        let mut t = self.field.one();

        // Stop once deg(r) < r_degree / 2
        while 2 * r.degree() >= r_degree {
            let r_last_last = r_last;
            let t_last_last = t_last;
            r_last = r;
            t_last = t;

            if r_last.is_zero() {
                return Err(ReedSolomonError::PrematureZeroRemainder);
            }
            r = r_last_last;
            let mut q = self.field.zero();
            let denominator_leading_term = r_last.coefficient(r_last.degree());
            let dlt_inverse = self.field.inverse(denominator_leading_term)?;
            while r.degree() >= r_last.degree() && !r.is_zero() {
                let degree_diff = r.degree() - r_last.degree();
                let scale = self.field.multiply(r.coefficient(r.degree()), dlt_inverse);
                q = q.add_or_subtract(&self.field.build_monomial(degree_diff, scale))?;
                r = r.add_or_subtract(&r_last.multiply_by_monomial(degree_diff, scale))?;
            }

            t = q.multiply(&t_last)?.add_or_subtract(&t_last_last)?;

            if r.degree() >= r_last.degree() {
                return Err(ReedSolomonError::DegreeNotReduced);
            }
        }

        let sigma_tilde_at_zero = t.coefficient(0);
        if sigma_tilde_at_zero == 0 {
            return Err(ReedSolomonError::SigmaTildeZero);
        }
        let inverse = self.field.inverse(sigma_tilde_at_zero)?;
        Ok((t.multiply_scalar(inverse), r.multiply_scalar(inverse)))
    }

    /// Chien search: inverses of the roots of the error locator
    fn find_error_locations(
        &self,
        error_locator: &Polynomial<'f>,
    ) -> Result<Vec<u32>, ReedSolomonError> {
        let num_errors = error_locator.degree();
        match num_errors {
            0 => return Err(ReedSolomonError::NoErrorsLocated),
            1 => return Ok(vec![error_locator.coefficient(1)]),
            _ => {}
        }
        let mut result = Vec::with_capacity(num_errors);
        for i in 1..self.field.size() as u32 {
            if result.len() >= num_errors {
                break;
            }
            if error_locator.evaluate_at(i) == 0 {
                result.push(self.field.inverse(i)?);
            }
        }
        if result.len() != num_errors {
            return Err(ReedSolomonError::RootCountMismatch {
                expected: num_errors,
                found: result.len(),
            });
        }
        Ok(result)
    }

    /// Forney's formula
    fn find_error_magnitudes(
        &self,
        error_evaluator: &Polynomial<'f>,
        error_locations: &[u32],
    ) -> Result<Vec<u32>, ReedSolomonError> {
        let field = self.field;
        let mut magnitudes = Vec::with_capacity(error_locations.len());
        for (i, &location) in error_locations.iter().enumerate() {
            let xi_inverse = field.inverse(location)?;
            let mut denominator = 1;
            for (j, &other) in error_locations.iter().enumerate() {
                if i != j {
                    // 1 + X_j / X_i, flipping the low bit is adding 1
                    let term = field.multiply(other, xi_inverse);
                    denominator = field.multiply(denominator, term ^ 1);
                }
            }
            let mut magnitude = field.multiply(
                error_evaluator.evaluate_at(xi_inverse),
                field.inverse(denominator)?,
            );
            if field.generator_base() != 0 {
                magnitude = field.multiply(magnitude, xi_inverse);
            }
            magnitudes.push(magnitude);
        }
        Ok(magnitudes)
    }
}
