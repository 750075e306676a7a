//! Checked exact-decimal arithmetic.
//!
//! `Decimal` panics on division by zero and on overflow. Every pipeline stage
//! goes through these helpers instead so degenerate input surfaces as a
//! `DomainError` naming the computation that failed.

use rust_decimal::{Decimal, MathematicalOps};

use super::DomainError;

/// Decimal three, the TFN component count.
pub const THREE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Divides `numerator` by `denominator`.
pub fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> Result<Decimal, DomainError> {
    if denominator.is_zero() {
        return Err(DomainError::division_by_zero(context));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| DomainError::overflow(context))
}

/// Multiplies two decimals.
pub fn checked_mul(left: Decimal, right: Decimal, context: &str) -> Result<Decimal, DomainError> {
    left.checked_mul(right)
        .ok_or_else(|| DomainError::overflow(context))
}

/// Adds two decimals.
pub fn checked_add(left: Decimal, right: Decimal, context: &str) -> Result<Decimal, DomainError> {
    left.checked_add(right)
        .ok_or_else(|| DomainError::overflow(context))
}

/// Sums an iterator of decimals.
pub fn checked_sum<I>(values: I, context: &str) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| checked_add(acc, value, context))
}

/// Square of a decimal.
pub fn square(value: Decimal, context: &str) -> Result<Decimal, DomainError> {
    checked_mul(value, value, context)
}

/// Square root of a non-negative decimal.
pub fn sqrt(value: Decimal, context: &str) -> Result<Decimal, DomainError> {
    value.sqrt().ok_or_else(|| {
        DomainError::validation(context, format!("Cannot take square root of {}", value))
    })
}

/// Raises `base` to `exponent`.
///
/// Integer exponents are computed exactly by repeated multiplication;
/// fractional exponents go through the decimal `exp(ln(x) * e)` approximation.
pub fn pow(base: Decimal, exponent: Decimal, context: &str) -> Result<Decimal, DomainError> {
    if base.is_zero() && exponent.is_sign_negative() && !exponent.is_zero() {
        return Err(DomainError::division_by_zero(context));
    }
    base.checked_powd(exponent)
        .ok_or_else(|| DomainError::overflow(context))
}
