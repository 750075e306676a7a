//! Triangular fuzzy number value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::numeric::{self, THREE};
use crate::domain::foundation::{DomainError, ValidationError};

/// How a list of fuzzy numbers is folded into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// `(min a, mean b, max c)`: the union of several experts' estimates.
    #[default]
    Union,
    /// Componentwise maximum.
    Max,
    /// Componentwise minimum.
    Min,
}

/// A triangular fuzzy number `(a, b, c)` with `0 <= a <= b <= c`.
///
/// Membership rises linearly from `a` to the peak at `b` and falls back to
/// zero at `c`. Instances are immutable; every operation returns a new value
/// and re-checks the invariant.
///
/// # Ordering
///
/// There is deliberately no `PartialOrd` impl. Fuzzy bounds are ranked with
/// four explicit comparators: [`less_than`](Self::less_than) looks only at
/// the lower bound `a`, [`greater_than`](Self::greater_than) only at the
/// upper bound `c`. Two numbers can therefore be neither less nor greater
/// than each other, and `less_than` is not the negation of
/// `greater_or_equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Decimal; 3]", into = "[Decimal; 3]")]
pub struct TriangularFuzzyNumber {
    a: Decimal,
    b: Decimal,
    c: Decimal,
}

impl TriangularFuzzyNumber {
    /// Creates a fuzzy number, rejecting negative or non-monotonic components.
    pub fn new(a: Decimal, b: Decimal, c: Decimal) -> Result<Self, ValidationError> {
        if a < Decimal::ZERO || !(a <= b && b <= c) {
            return Err(ValidationError::invalid_fuzzy_number(a, b, c));
        }
        Ok(Self { a, b, c })
    }

    /// Creates the crisp number `(value, value, value)`.
    pub fn crisp(value: Decimal) -> Result<Self, ValidationError> {
        Self::new(value, value, value)
    }

    /// Lower bound.
    pub fn a(&self) -> Decimal {
        self.a
    }

    /// Most likely value.
    pub fn b(&self) -> Decimal {
        self.b
    }

    /// Upper bound.
    pub fn c(&self) -> Decimal {
        self.c
    }

    /// Componentwise product `(a1*a2, b1*b2, c1*c2)`.
    pub fn multiply(&self, other: &Self) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy multiplication";
        Ok(Self::new(
            numeric::checked_mul(self.a, other.a, CONTEXT)?,
            numeric::checked_mul(self.b, other.b, CONTEXT)?,
            numeric::checked_mul(self.c, other.c, CONTEXT)?,
        )?)
    }

    /// Multiplies every component by a scalar.
    pub fn scale(&self, factor: Decimal) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy scaling";
        Ok(Self::new(
            numeric::checked_mul(self.a, factor, CONTEXT)?,
            numeric::checked_mul(self.b, factor, CONTEXT)?,
            numeric::checked_mul(self.c, factor, CONTEXT)?,
        )?)
    }

    /// Fuzzy division `(a1/c2, b1/b2, c1/a2)`.
    ///
    /// The divisor's bounds swap so the quotient keeps `a <= b <= c`. This is
    /// not the inverse of [`multiply`](Self::multiply).
    pub fn divide(&self, other: &Self) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy division";
        Ok(Self::new(
            numeric::checked_div(self.a, other.c, CONTEXT)?,
            numeric::checked_div(self.b, other.b, CONTEXT)?,
            numeric::checked_div(self.c, other.a, CONTEXT)?,
        )?)
    }

    /// Divides every component by a scalar, without swapping bounds.
    pub fn divide_scalar(&self, divisor: Decimal) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy scalar division";
        Ok(Self::new(
            numeric::checked_div(self.a, divisor, CONTEXT)?,
            numeric::checked_div(self.b, divisor, CONTEXT)?,
            numeric::checked_div(self.c, divisor, CONTEXT)?,
        )?)
    }

    /// Raises the number to `exponent`.
    ///
    /// A non-negative exponent applies componentwise. A negative exponent
    /// raises the reciprocal: `(1/c^|e|, 1/b^|e|, 1/a^|e|)`.
    pub fn power(&self, exponent: Decimal) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy power";
        if exponent.is_sign_negative() && !exponent.is_zero() {
            let magnitude = exponent.abs();
            return Ok(Self::new(
                numeric::checked_div(Decimal::ONE, numeric::pow(self.c, magnitude, CONTEXT)?, CONTEXT)?,
                numeric::checked_div(Decimal::ONE, numeric::pow(self.b, magnitude, CONTEXT)?, CONTEXT)?,
                numeric::checked_div(Decimal::ONE, numeric::pow(self.a, magnitude, CONTEXT)?, CONTEXT)?,
            )?);
        }
        Ok(Self::new(
            numeric::pow(self.a, exponent, CONTEXT)?,
            numeric::pow(self.b, exponent, CONTEXT)?,
            numeric::pow(self.c, exponent, CONTEXT)?,
        )?)
    }

    /// Reciprocal `(1/c, 1/b, 1/a)`.
    pub fn reciprocal(&self) -> Result<Self, DomainError> {
        self.power(Decimal::NEGATIVE_ONE)
    }

    /// True iff `self.a < other.a`.
    pub fn less_than(&self, other: &Self) -> bool {
        self.a < other.a
    }

    /// True iff `self.c > other.c`.
    pub fn greater_than(&self, other: &Self) -> bool {
        self.c > other.c
    }

    /// `less_than` or equal.
    pub fn less_or_equal(&self, other: &Self) -> bool {
        self.less_than(other) || self == other
    }

    /// `greater_than` or equal.
    pub fn greater_or_equal(&self, other: &Self) -> bool {
        self.greater_than(other) || self == other
    }

    /// The smaller of two numbers under [`less_than`](Self::less_than).
    ///
    /// Keeps `self` unless `other` is strictly less.
    pub fn fuzzy_min(self, other: Self) -> Self {
        if other.less_than(&self) {
            other
        } else {
            self
        }
    }

    /// The larger of two numbers under [`greater_than`](Self::greater_than).
    ///
    /// Keeps `self` unless `other` is strictly greater.
    pub fn fuzzy_max(self, other: Self) -> Self {
        if other.greater_than(&self) {
            other
        } else {
            self
        }
    }

    /// Degree of membership of `x`, in `[0, 1]`.
    ///
    /// The peak `x == b` is always 1, so degenerate ramps (`a == b` or
    /// `b == c`) never divide by zero.
    pub fn membership(&self, x: Decimal) -> Result<Decimal, DomainError> {
        const CONTEXT: &str = "fuzzy membership";
        if x < self.a || x > self.c {
            return Ok(Decimal::ZERO);
        }
        if x == self.b {
            return Ok(Decimal::ONE);
        }
        if x < self.b {
            return numeric::checked_div(x - self.a, self.b - self.a, CONTEXT);
        }
        numeric::checked_div(self.c - x, self.c - self.b, CONTEXT)
    }

    /// Centroid defuzzification `(a + b + c) / 3`.
    pub fn centroid(&self) -> Result<Decimal, DomainError> {
        const CONTEXT: &str = "centroid defuzzification";
        let sum = numeric::checked_sum([self.a, self.b, self.c], CONTEXT)?;
        numeric::checked_div(sum, THREE, CONTEXT)
    }

    /// Folds several fuzzy numbers into one.
    ///
    /// # Errors
    /// Returns `MISSING_INPUT` for an empty list.
    pub fn combine(numbers: &[Self], how: Combination) -> Result<Self, DomainError> {
        const CONTEXT: &str = "fuzzy combination";
        let first = numbers
            .first()
            .ok_or_else(|| DomainError::missing_input("Cannot combine an empty list of fuzzy numbers"))?;

        let min_a = numbers.iter().map(|n| n.a).fold(first.a, Decimal::min);
        let max_a = numbers.iter().map(|n| n.a).fold(first.a, Decimal::max);
        let min_b = numbers.iter().map(|n| n.b).fold(first.b, Decimal::min);
        let max_b = numbers.iter().map(|n| n.b).fold(first.b, Decimal::max);
        let min_c = numbers.iter().map(|n| n.c).fold(first.c, Decimal::min);
        let max_c = numbers.iter().map(|n| n.c).fold(first.c, Decimal::max);

        let combined = match how {
            Combination::Max => Self::new(max_a, max_b, max_c)?,
            Combination::Min => Self::new(min_a, min_b, min_c)?,
            Combination::Union => {
                let sum_b = numeric::checked_sum(numbers.iter().map(|n| n.b), CONTEXT)?;
                let mean_b = numeric::checked_div(sum_b, Decimal::from(numbers.len()), CONTEXT)?;
                Self::new(min_a, mean_b, max_c)?
            }
        };
        Ok(combined)
    }

    /// Vertex distance `sqrt(((a1-a2)^2 + (b1-b2)^2 + (c1-c2)^2) / 3)`.
    pub fn euclidean_distance(left: &Self, right: &Self) -> Result<Decimal, DomainError> {
        const CONTEXT: &str = "fuzzy euclidean distance";
        let squares = numeric::checked_sum(
            [
                numeric::square(left.a - right.a, CONTEXT)?,
                numeric::square(left.b - right.b, CONTEXT)?,
                numeric::square(left.c - right.c, CONTEXT)?,
            ],
            CONTEXT,
        )?;
        numeric::sqrt(numeric::checked_div(squares, THREE, CONTEXT)?, CONTEXT)
    }
}

impl TryFrom<[Decimal; 3]> for TriangularFuzzyNumber {
    type Error = ValidationError;

    fn try_from([a, b, c]: [Decimal; 3]) -> Result<Self, Self::Error> {
        Self::new(a, b, c)
    }
}

impl From<TriangularFuzzyNumber> for [Decimal; 3] {
    fn from(tfn: TriangularFuzzyNumber) -> Self {
        [tfn.a, tfn.b, tfn.c]
    }
}

impl std::fmt::Display for TriangularFuzzyNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}
