//! Exact arithmetic.
//!
//! Every quantity in the pipeline (utilities, eaten amounts, remaining
//! supply, lottery weights) is an arbitrary-precision rational. Both main
//! loops stop on exact `== 0` tests, which floating point cannot provide.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

/// Arbitrary-precision rational number.
pub type Rational = BigRational;

/// Builds the rational `value / 1`.
pub fn rational(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// Builds the rational `numer / denom`.
///
/// # Panics
/// Panics if `denom` is zero.
pub fn ratio(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Sum of a row.
pub fn row_sum(row: &[Rational]) -> Rational {
    row.iter().fold(Rational::zero(), |acc, v| acc + v)
}

/// Column sums of a matrix whose rows are all `width` long.
pub fn column_sums(rows: &[Vec<Rational>], width: usize) -> Vec<Rational> {
    let mut sums = vec![Rational::zero(); width];
    for row in rows {
        for (sum, value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }
    sums
}
