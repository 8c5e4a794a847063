use super::galois::GaloisField;
use crate::error::GaloisError;

/// Immutable polynomial over a [`GaloisField`].
///
/// Coefficients are stored highest degree first and never carry leading
/// zeros, except for the zero polynomial which is `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<'f> {
    field: &'f GaloisField,
    coefficients: Vec<u32>,
}

impl<'f> Polynomial<'f> {
    /// Build a polynomial from coefficients, most significant first
    pub fn new(field: &'f GaloisField, coefficients: &[u32]) -> Result<Self, GaloisError> {
        if coefficients.is_empty() {
            return Err(GaloisError::EmptyCoefficients);
        }
        Ok(Self::from_raw(field, coefficients.to_vec()))
    }

    pub(crate) fn constant(field: &'f GaloisField, value: u32) -> Self {
        Self {
            field,
            coefficients: vec![value],
        }
    }

    /// Caller guarantees `coefficients` is non-empty
    pub(crate) fn from_raw(field: &'f GaloisField, mut coefficients: Vec<u32>) -> Self {
        let leading_zeros = coefficients
            .iter()
            .take_while(|&&c| c == 0)
            .count()
            .min(coefficients.len().saturating_sub(1));
        coefficients.drain(..leading_zeros);
        if coefficients.is_empty() {
            coefficients.push(0);
        }
        Self {
            field,
            coefficients,
        }
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u32] {
        &self.coefficients
    }

    /// Highest power with a nonzero coefficient; 0 for constants
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// True for the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of `x^degree`
    pub fn coefficient(&self, degree: usize) -> u32 {
        match self.degree().checked_sub(degree) {
            Some(index) => self.coefficients[index],
            None => 0,
        }
    }

    /// Evaluate at `a` with Horner's rule
    pub fn evaluate_at(&self, a: u32) -> u32 {
        if a == 0 {
            return self.coefficient(0);
        }
        if a == 1 {
            return self.coefficients.iter().fold(0, |acc, &c| acc ^ c);
        }
        let mut result = self.coefficients[0];
        for &c in &self.coefficients[1..] {
            result = GaloisField::add_or_subtract(self.field.multiply(a, result), c);
        }
        result
    }

    /// Coefficient-wise XOR
    pub fn add_or_subtract(&self, other: &Self) -> Result<Self, GaloisError> {
        self.check_field(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };
        let length_diff = larger.len() - smaller.len();
        let mut sum = larger[..length_diff].to_vec();
        sum.extend(
            larger[length_diff..]
                .iter()
                .zip(smaller)
                .map(|(&a, &b)| GaloisField::add_or_subtract(a, b)),
        );
        Ok(Self::from_raw(self.field, sum))
    }

    /// Full product over the field
    pub fn multiply(&self, other: &Self) -> Result<Self, GaloisError> {
        self.check_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(self.field.zero());
        }
        let mut product = vec![0u32; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] ^= self.field.multiply(a, b);
            }
        }
        Ok(Self::from_raw(self.field, product))
    }

    /// Every coefficient times `scalar`
    pub fn multiply_scalar(&self, scalar: u32) -> Self {
        match scalar {
            0 => self.field.zero(),
            1 => self.clone(),
            _ => Self::from_raw(
                self.field,
                self.coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect(),
            ),
        }
    }

    /// `self * coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u32) -> Self {
        if coefficient == 0 {
            return self.field.zero();
        }
        let mut product: Vec<u32> = self
            .coefficients
            .iter()
            .map(|&c| self.field.multiply(c, coefficient))
            .collect();
        product.resize(product.len() + degree, 0);
        Self::from_raw(self.field, product)
    }

    /// Long division, returning `(quotient, remainder)`
    pub fn divide(&self, other: &Self) -> Result<(Self, Self), GaloisError> {
        self.check_field(other)?;
        if other.is_zero() {
            return Err(GaloisError::DivideByZero);
        }

        let mut quotient = self.field.zero();
        let mut remainder = self.clone();

        let inverse_leading_term = self.field.inverse(other.coefficient(other.degree()))?;

        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_difference = remainder.degree() - other.degree();
            let scale = self
                .field
                .multiply(remainder.coefficient(remainder.degree()), inverse_leading_term);
            let term = other.multiply_by_monomial(degree_difference, scale);
            let iteration_quotient = self.field.build_monomial(degree_difference, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient)?;
            remainder = remainder.add_or_subtract(&term)?;
        }

        Ok((quotient, remainder))
    }

    fn check_field(&self, other: &Self) -> Result<(), GaloisError> {
        if self.field != other.field {
            return Err(GaloisError::FieldMismatch);
        }
        Ok(())
    }
}
