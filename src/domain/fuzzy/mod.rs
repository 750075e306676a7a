//! Fuzzy Module - Triangular fuzzy numbers.
//!
//! The TFN type underpins Fuzzy TOPSIS, Fuzzy PROMETHEE and Fuzzy AHP.

mod triangular;

pub use triangular::{Combination, TriangularFuzzyNumber};
