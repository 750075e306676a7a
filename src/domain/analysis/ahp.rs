//! AHP - Criterion weights from pairwise comparisons.
//!
//! Weights are the normalized geometric means of the comparison matrix rows.
//! Options are then scored by a weighted sum of per-criterion normalized
//! scores. Fuzzy AHP reuses the consistency and scoring stages.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::ranking::{rank_descending, RankedOption};
use super::table::{distinct, ScoreRow};
use crate::domain::foundation::numeric;
use crate::domain::foundation::{DomainError, ValidationError};

/// Saaty's random consistency index for matrices of size 1 to 10.
pub const RANDOM_INDEX: [Decimal; 10] = [
    dec!(0),
    dec!(0),
    dec!(0.58),
    dec!(0.90),
    dec!(1.12),
    dec!(1.24),
    dec!(1.32),
    dec!(1.41),
    dec!(1.45),
    dec!(1.49),
];

/// Conventional upper bound for an acceptable consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: Decimal = dec!(0.10);

/// Random index for an `n`-by-`n` matrix. Sizes beyond the table use 1.49.
pub fn random_index(n: usize) -> Decimal {
    match n {
        0 => Decimal::ZERO,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// One judgment: how much more important `criterion_a` is than
/// `criterion_b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseComparison<T> {
    pub criterion_a: String,
    pub criterion_b: String,
    pub value: T,
}

impl<T> PairwiseComparison<T> {
    /// Creates a pairwise comparison.
    pub fn new(criterion_a: impl Into<String>, criterion_b: impl Into<String>, value: T) -> Self {
        Self {
            criterion_a: criterion_a.into(),
            criterion_b: criterion_b.into(),
            value,
        }
    }
}

/// Positions of each comparison in a matrix over `criteria`.
///
/// Rejects unknown criteria, self-comparisons and pairs judged twice.
pub(crate) fn comparison_positions<T>(
    criteria: &[String],
    pairs: &[PairwiseComparison<T>],
) -> Result<Vec<(usize, usize)>, ValidationError> {
    let index: HashMap<&str, usize> = criteria
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut seen = HashSet::new();
    pairs
        .iter()
        .map(|pair| {
            let i = *index
                .get(pair.criterion_a.as_str())
                .ok_or_else(|| ValidationError::unknown_reference("comparisons", &pair.criterion_a))?;
            let j = *index
                .get(pair.criterion_b.as_str())
                .ok_or_else(|| ValidationError::unknown_reference("comparisons", &pair.criterion_b))?;
            if i == j {
                return Err(ValidationError::invalid_format(
                    "comparisons",
                    format!("'{}' cannot be compared with itself", pair.criterion_a),
                ));
            }
            if !seen.insert((i.min(j), i.max(j))) {
                return Err(ValidationError::duplicate_value(
                    "comparisons",
                    format!("{} / {}", pair.criterion_a, pair.criterion_b),
                ));
            }
            Ok((i, j))
        })
        .collect()
}

/// Square reciprocal matrix of crisp pairwise judgments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    criteria: Vec<String>,
    values: Vec<Vec<Decimal>>,
}

impl ComparisonMatrix {
    /// Wraps a full matrix. Reciprocity is the caller's responsibility.
    ///
    /// # Errors
    /// - `EmptyField` if there are no criteria
    /// - `InvalidFormat` if the matrix is not `n`-by-`n` or has a non-positive
    ///   entry
    pub fn new(criteria: Vec<String>, values: Vec<Vec<Decimal>>) -> Result<Self, ValidationError> {
        if criteria.is_empty() {
            return Err(ValidationError::empty_field("criteria"));
        }
        let n = criteria.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return Err(ValidationError::invalid_format(
                "comparison_matrix",
                format!("expected a {}x{} matrix", n, n),
            ));
        }
        if values.iter().flatten().any(|v| *v <= Decimal::ZERO) {
            return Err(ValidationError::invalid_format(
                "comparison_matrix",
                "judgments must be positive",
            ));
        }
        Ok(Self { criteria, values })
    }

    /// Builds the matrix from upper-triangle judgments.
    ///
    /// The diagonal is 1, each judgment's mirror cell is its reciprocal, and
    /// pairs never mentioned default to 1 (equal importance).
    pub fn from_pairs(
        criteria: Vec<String>,
        pairs: &[PairwiseComparison<Decimal>],
    ) -> Result<Self, DomainError> {
        const CONTEXT: &str = "comparison matrix reciprocal";

        let positions = comparison_positions(&criteria, pairs)?;
        if let Some(pair) = pairs.iter().find(|pair| pair.value <= Decimal::ZERO) {
            return Err(ValidationError::invalid_format(
                "comparisons",
                format!(
                    "judgment {} / {} must be positive, got {}",
                    pair.criterion_a, pair.criterion_b, pair.value
                ),
            )
            .into());
        }

        let n = criteria.len();
        let mut values = vec![vec![Decimal::ONE; n]; n];
        for (pair, (i, j)) in pairs.iter().zip(positions) {
            values[i][j] = pair.value;
            values[j][i] = numeric::checked_div(Decimal::ONE, pair.value, CONTEXT)?;
        }
        Ok(Self::new(criteria, values)?)
    }

    /// Criteria in row order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Number of criteria.
    pub fn size(&self) -> usize {
        self.criteria.len()
    }

    /// Rows of the matrix.
    pub fn rows(&self) -> &[Vec<Decimal>] {
        &self.values
    }
}

/// Derived weight of one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub criterion: String,
    pub weight: Decimal,
}

/// Normalized and weighted score of one (option, criterion) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhpWeightedScore {
    pub option: String,
    pub criterion: String,
    pub normalized_score: Decimal,
    pub weight: Decimal,
    pub weighted_score: Decimal,
}

/// Result of an AHP or Fuzzy AHP run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhpOutcome {
    pub ranking: Vec<RankedOption>,
    pub weights: Vec<CriterionWeight>,
    pub consistency_ratio: Decimal,
    pub weighted_scores: Vec<AhpWeightedScore>,
}

impl AhpOutcome {
    /// True when the consistency ratio is below `threshold`.
    pub fn is_consistent(&self, threshold: Decimal) -> bool {
        self.consistency_ratio < threshold
    }
}

/// AHP pipeline stages.
pub struct AhpCalculator;

impl AhpCalculator {
    /// Normalized geometric mean of each row, scaled to sum to 1.
    ///
    /// The mean is taken as `Π (x^(1/n))` so the running product stays
    /// within the row's largest judgment however many criteria there are.
    pub fn priority_vector(matrix: &ComparisonMatrix) -> Result<Vec<CriterionWeight>, DomainError> {
        const CONTEXT: &str = "AHP priority vector";

        let exponent = numeric::checked_div(Decimal::ONE, Decimal::from(matrix.size()), CONTEXT)?;
        let means = matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter().try_fold(Decimal::ONE, |acc, value| {
                    let root = numeric::pow(*value, exponent, CONTEXT)?;
                    numeric::checked_mul(acc, root, CONTEXT)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::normalize_weights(matrix.criteria(), &means, CONTEXT)
    }

    /// Scales raw per-criterion weights to sum to 1.
    pub(crate) fn normalize_weights(
        criteria: &[String],
        raw: &[Decimal],
        context: &str,
    ) -> Result<Vec<CriterionWeight>, DomainError> {
        let total = numeric::checked_sum(raw.iter().copied(), context)?;
        criteria
            .iter()
            .zip(raw)
            .map(|(criterion, value)| {
                Ok(CriterionWeight {
                    criterion: criterion.clone(),
                    weight: numeric::checked_div(*value, total, context)?,
                })
            })
            .collect()
    }

    /// Consistency ratio `CI / RI` with `CI = (λmax - n) / (n - 1)`.
    ///
    /// Matrices with two or fewer criteria are always consistent and return 0.
    pub fn consistency_ratio(
        matrix: &ComparisonMatrix,
        weights: &[CriterionWeight],
    ) -> Result<Decimal, DomainError> {
        const CONTEXT: &str = "AHP consistency ratio";

        let n = matrix.size();
        if n <= 2 {
            return Ok(Decimal::ZERO);
        }

        let by_criterion: HashMap<&str, Decimal> = weights
            .iter()
            .map(|w| (w.criterion.as_str(), w.weight))
            .collect();
        let ordered = matrix
            .criteria()
            .iter()
            .map(|criterion| {
                by_criterion
                    .get(criterion.as_str())
                    .copied()
                    .ok_or_else(|| ValidationError::missing_value("weight", criterion).into())
            })
            .collect::<Result<Vec<Decimal>, DomainError>>()?;

        let mut lambda_sum = Decimal::ZERO;
        for (row, own_weight) in matrix.rows().iter().zip(&ordered) {
            let weighted_sum = numeric::checked_sum(
                row.iter()
                    .zip(&ordered)
                    .map(|(value, weight)| numeric::checked_mul(*value, *weight, CONTEXT))
                    .collect::<Result<Vec<_>, _>>()?,
                CONTEXT,
            )?;
            let lambda = numeric::checked_div(weighted_sum, *own_weight, CONTEXT)?;
            lambda_sum = numeric::checked_add(lambda_sum, lambda, CONTEXT)?;
        }

        let size = Decimal::from(n);
        let lambda_max = numeric::checked_div(lambda_sum, size, CONTEXT)?;
        let consistency_index = numeric::checked_div(lambda_max - size, size - Decimal::ONE, CONTEXT)?;

        let ri = random_index(n);
        if ri.is_zero() {
            return Ok(Decimal::ZERO);
        }
        numeric::checked_div(consistency_index, ri, CONTEXT)
    }

    /// Weighted score of every (option, criterion) cell.
    ///
    /// Cost scores are inverted to `1 / score` first. Scores are then divided
    /// by their criterion's sum across options and multiplied by the
    /// criterion weight.
    ///
    /// # Errors
    /// `DIVISION_BY_ZERO` for a zero cost score or a criterion whose adjusted
    /// scores sum to 0.
    pub fn weighted_scores(
        scores: &[ScoreRow<Decimal>],
        weights: &[CriterionWeight],
    ) -> Result<Vec<AhpWeightedScore>, DomainError> {
        const CONTEXT: &str = "AHP weighted scores";

        let weights: HashMap<&str, Decimal> = weights
            .iter()
            .map(|w| (w.criterion.as_str(), w.weight))
            .collect();

        let adjusted = scores
            .iter()
            .map(|row| {
                if row.is_negative {
                    numeric::checked_div(Decimal::ONE, row.score, CONTEXT)
                        .map_err(|err| err.with_detail("option", row.option.clone()))
                } else {
                    Ok(row.score)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut criterion_sums: HashMap<&str, Decimal> = HashMap::new();
        for (row, value) in scores.iter().zip(&adjusted) {
            let sum = criterion_sums.entry(row.criterion.as_str()).or_default();
            *sum = numeric::checked_add(*sum, *value, CONTEXT)?;
        }

        scores
            .iter()
            .zip(adjusted)
            .map(|(row, value)| {
                let weight = weights
                    .get(row.criterion.as_str())
                    .copied()
                    .ok_or_else(|| ValidationError::unknown_reference("criterion", &row.criterion))?;
                let sum = criterion_sums
                    .get(row.criterion.as_str())
                    .copied()
                    .unwrap_or_default();
                let normalized_score = numeric::checked_div(value, sum, CONTEXT)
                    .map_err(|err| err.with_detail("criterion", row.criterion.clone()))?;
                Ok(AhpWeightedScore {
                    option: row.option.clone(),
                    criterion: row.criterion.clone(),
                    normalized_score,
                    weight,
                    weighted_score: numeric::checked_mul(normalized_score, weight, CONTEXT)?,
                })
            })
            .collect()
    }

    /// Sums weighted scores per option and ranks, highest first.
    pub fn ranking(scores: &[AhpWeightedScore]) -> Result<Vec<RankedOption>, DomainError> {
        const CONTEXT: &str = "AHP ranking";

        let totals = distinct(scores.iter().map(|s| s.option.as_str()))
            .into_iter()
            .map(|option| {
                let total = numeric::checked_sum(
                    scores
                        .iter()
                        .filter(|s| s.option == option)
                        .map(|s| s.weighted_score),
                    CONTEXT,
                )?;
                Ok((option, total))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(rank_descending(totals))
    }

    /// Scores and ranks options with already-derived weights.
    pub(crate) fn score_and_rank(
        matrix: &ComparisonMatrix,
        weights: Vec<CriterionWeight>,
        scores: &[ScoreRow<Decimal>],
    ) -> Result<AhpOutcome, DomainError> {
        let consistency_ratio = Self::consistency_ratio(matrix, &weights)?;
        let weighted_scores = Self::weighted_scores(scores, &weights)?;
        let ranking = Self::ranking(&weighted_scores)?;

        Ok(AhpOutcome {
            ranking,
            weights,
            consistency_ratio,
            weighted_scores,
        })
    }

    /// Runs the full pipeline.
    pub fn calculate(
        matrix: &ComparisonMatrix,
        scores: &[ScoreRow<Decimal>],
    ) -> Result<AhpOutcome, DomainError> {
        let weights = Self::priority_vector(matrix)?;
        Self::score_and_rank(matrix, weights, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    // ─────────────────────────────────────────────────────────────────────
    // Test Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn saaty_matrix() -> ComparisonMatrix {
        ComparisonMatrix::from_pairs(
            names(&["C1", "C2", "C3"]),
            &[
                PairwiseComparison::new("C1", "C2", dec!(3)),
                PairwiseComparison::new("C1", "C3", dec!(5)),
                PairwiseComparison::new("C2", "C3", dec!(3)),
            ],
        )
        .unwrap()
    }

    fn scores() -> Vec<ScoreRow<Decimal>> {
        let mut rows = Vec::new();
        for (option, price, quality, speed) in [
            ("A", dec!(500), dec!(8), dec!(90)),
            ("B", dec!(300), dec!(6), dec!(70)),
            ("C", dec!(700), dec!(9), dec!(80)),
        ] {
            rows.push(ScoreRow::new(option, "C1", price, true));
            rows.push(ScoreRow::new(option, "C2", quality, false));
            rows.push(ScoreRow::new(option, "C3", speed, false));
        }
        rows
    }

    // ─────────────────────────────────────────────────────────────────────
    // Comparison matrix
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn from_pairs_fills_reciprocals_and_diagonal() {
        let matrix = saaty_matrix();
        let rows = matrix.rows();

        assert_eq!(rows[0], vec![dec!(1), dec!(3), dec!(5)]);
        assert_eq!(rows[1][1], dec!(1));
        assert_eq!(rows[2][0], dec!(0.2));
        assert_eq!(rows[1][0], Decimal::ONE / dec!(3));
    }

    #[test]
    fn unmentioned_pairs_default_to_equal_importance() {
        let matrix = ComparisonMatrix::from_pairs(
            names(&["C1", "C2", "C3"]),
            &[PairwiseComparison::new("C1", "C2", dec!(2))],
        )
        .unwrap();
        assert_eq!(matrix.rows()[0][2], dec!(1));
        assert_eq!(matrix.rows()[2][1], dec!(1));
    }

    #[test]
    fn from_pairs_rejects_unknown_criterion() {
        let err = ComparisonMatrix::from_pairs(
            names(&["C1", "C2"]),
            &[PairwiseComparison::new("C1", "Z", dec!(2))],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingInput);
    }

    #[test]
    fn from_pairs_rejects_duplicate_pair() {
        let err = ComparisonMatrix::from_pairs(
            names(&["C1", "C2"]),
            &[
                PairwiseComparison::new("C1", "C2", dec!(2)),
                PairwiseComparison::new("C2", "C1", dec!(3)),
            ],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn from_pairs_rejects_non_positive_value() {
        let err = ComparisonMatrix::from_pairs(
            names(&["C1", "C2"]),
            &[PairwiseComparison::new("C1", "C2", dec!(0))],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_rejects_non_square_matrix() {
        let result = ComparisonMatrix::new(names(&["C1", "C2"]), vec![vec![dec!(1), dec!(2)]]);
        assert!(result.is_err());
    }

    #[test]
    fn random_index_falls_back_beyond_table() {
        assert_eq!(random_index(3), dec!(0.58));
        assert_eq!(random_index(10), dec!(1.49));
        assert_eq!(random_index(15), dec!(1.49));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Weights and consistency
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn priority_vector_orders_by_importance_and_sums_to_one() {
        let weights = AhpCalculator::priority_vector(&saaty_matrix()).unwrap();

        assert!(weights[0].weight > weights[1].weight);
        assert!(weights[1].weight > weights[2].weight);
        let total: Decimal = weights.iter().map(|w| w.weight).sum();
        assert!((total - Decimal::ONE).abs() < dec!(0.0000000001));
    }

    #[test]
    fn priority_vector_handles_many_criteria() {
        let criteria: Vec<String> = (0..40).map(|i| format!("C{}", i)).collect();
        let pairs: Vec<_> = criteria[1..]
            .iter()
            .map(|other| PairwiseComparison::new("C0", other.as_str(), dec!(9)))
            .collect();
        let matrix = ComparisonMatrix::from_pairs(criteria, &pairs).unwrap();

        let weights = AhpCalculator::priority_vector(&matrix).unwrap();

        // 9 / (9 + 39)
        assert!((weights[0].weight - dec!(0.1875)).abs() < dec!(0.000001));
        assert!((weights[1].weight - weights[39].weight).abs() < dec!(0.000001));
        let cr = AhpCalculator::consistency_ratio(&matrix, &weights).unwrap();
        assert!(cr < DEFAULT_CONSISTENCY_THRESHOLD);
    }

    #[test]
    fn saaty_matrix_is_consistent() {
        let matrix = saaty_matrix();
        let weights = AhpCalculator::priority_vector(&matrix).unwrap();
        let cr = AhpCalculator::consistency_ratio(&matrix, &weights).unwrap();

        assert!(cr < DEFAULT_CONSISTENCY_THRESHOLD);
    }

    #[test]
    fn perfectly_consistent_matrix_has_near_zero_ratio() {
        let matrix = ComparisonMatrix::from_pairs(
            names(&["C1", "C2", "C3"]),
            &[
                PairwiseComparison::new("C1", "C2", dec!(2)),
                PairwiseComparison::new("C1", "C3", dec!(4)),
                PairwiseComparison::new("C2", "C3", dec!(2)),
            ],
        )
        .unwrap();
        let weights = AhpCalculator::priority_vector(&matrix).unwrap();
        let cr = AhpCalculator::consistency_ratio(&matrix, &weights).unwrap();

        assert!(cr.abs() < dec!(0.0001));
    }

    #[test]
    fn two_criteria_are_always_consistent() {
        let matrix = ComparisonMatrix::from_pairs(
            names(&["C1", "C2"]),
            &[PairwiseComparison::new("C1", "C2", dec!(7))],
        )
        .unwrap();
        let weights = AhpCalculator::priority_vector(&matrix).unwrap();
        assert_eq!(
            AhpCalculator::consistency_ratio(&matrix, &weights).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn inconsistent_matrix_exceeds_threshold() {
        let matrix = ComparisonMatrix::from_pairs(
            names(&["C1", "C2", "C3"]),
            &[
                PairwiseComparison::new("C1", "C2", dec!(9)),
                PairwiseComparison::new("C1", "C3", dec!(0.2)),
                PairwiseComparison::new("C2", "C3", dec!(9)),
            ],
        )
        .unwrap();
        let outcome = AhpCalculator::calculate(&matrix, &scores()).unwrap();
        assert!(!outcome.is_consistent(DEFAULT_CONSISTENCY_THRESHOLD));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scoring
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn cost_scores_are_inverted_before_normalizing() {
        let weights = vec![CriterionWeight {
            criterion: "Price".into(),
            weight: dec!(1),
        }];
        let scores = vec![
            ScoreRow::new("A", "Price", dec!(1), true),
            ScoreRow::new("B", "Price", dec!(4), true),
        ];
        let weighted = AhpCalculator::weighted_scores(&scores, &weights).unwrap();

        // 1/1 and 1/4 over their sum 1.25
        assert_eq!(weighted[0].normalized_score, dec!(0.8));
        assert_eq!(weighted[1].normalized_score, dec!(0.2));
    }

    #[test]
    fn zero_cost_score_is_division_by_zero() {
        let weights = vec![CriterionWeight {
            criterion: "Price".into(),
            weight: dec!(1),
        }];
        let scores = vec![ScoreRow::new("A", "Price", dec!(0), true)];
        let err = AhpCalculator::weighted_scores(&scores, &weights).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
    }

    #[test]
    fn zero_criterion_sum_is_division_by_zero() {
        let weights = vec![CriterionWeight {
            criterion: "Quality".into(),
            weight: dec!(1),
        }];
        let scores = vec![
            ScoreRow::new("A", "Quality", dec!(0), false),
            ScoreRow::new("B", "Quality", dec!(0), false),
        ];
        let err = AhpCalculator::weighted_scores(&scores, &weights).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
    }

    // ─────────────────────────────────────────────────────────────────────
    // End to end
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn full_run_ranks_every_option() {
        let outcome = AhpCalculator::calculate(&saaty_matrix(), &scores()).unwrap();

        assert_eq!(outcome.ranking.len(), 3);
        assert_eq!(outcome.weights.len(), 3);
        assert_eq!(outcome.weighted_scores.len(), 9);
        assert!(outcome.is_consistent(DEFAULT_CONSISTENCY_THRESHOLD));
        // B is cheapest and price dominates the weights
        assert_eq!(outcome.ranking[0].option, "B");

        let total: Decimal = outcome.ranking.iter().map(|r| r.performance_score).sum();
        assert!((total - Decimal::ONE).abs() < dec!(0.0000000001));
    }

    #[test]
    fn calculation_is_idempotent() {
        assert_eq!(
            AhpCalculator::calculate(&saaty_matrix(), &scores()).unwrap(),
            AhpCalculator::calculate(&saaty_matrix(), &scores()).unwrap()
        );
    }
}
