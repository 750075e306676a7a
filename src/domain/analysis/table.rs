//! Row tables shared by the ranking pipelines.
//!
//! Every pipeline consumes a long-format table: one row per
//! (option, criterion) cell. The scalar type is `Decimal` for the crisp
//! methods and `TriangularFuzzyNumber` for the fuzzy ones.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One (option, criterion) cell of a weighted decision matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRow<T> {
    pub option: String,
    pub criterion: String,
    pub score: T,
    pub weight: T,
    /// True for cost criteria, where a lower raw score is better.
    pub is_negative: bool,
}

impl<T> DecisionRow<T> {
    /// Creates a decision row.
    pub fn new(
        option: impl Into<String>,
        criterion: impl Into<String>,
        score: T,
        weight: T,
        is_negative: bool,
    ) -> Self {
        Self {
            option: option.into(),
            criterion: criterion.into(),
            score,
            weight,
            is_negative,
        }
    }
}

/// One (option, criterion) cell without a weight.
///
/// AHP derives weights from pairwise comparisons, so its score table carries
/// none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow<T> {
    pub option: String,
    pub criterion: String,
    pub score: T,
    pub is_negative: bool,
}

impl<T> ScoreRow<T> {
    /// Creates a score row.
    pub fn new(
        option: impl Into<String>,
        criterion: impl Into<String>,
        score: T,
        is_negative: bool,
    ) -> Self {
        Self {
            option: option.into(),
            criterion: criterion.into(),
            score,
            is_negative,
        }
    }
}

/// Distinct values in order of first appearance.
pub(crate) fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
