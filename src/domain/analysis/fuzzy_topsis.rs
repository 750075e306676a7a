//! Fuzzy TOPSIS - Closeness-to-ideal ranking over triangular fuzzy numbers.
//!
//! Each decision maker supplies a full table of fuzzy scores and weights.
//! The tables are first combined cell by cell with the `(min, mean, max)`
//! union, then run through the TOPSIS stages with fuzzy arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ranking::RankedOption;
use super::table::{distinct, DecisionRow};
use super::topsis::{IdealSolution, SeparationMeasure, TopsisCalculator};
use crate::domain::foundation::numeric;
use crate::domain::foundation::DomainError;
use crate::domain::fuzzy::{Combination, TriangularFuzzyNumber};

/// A fuzzy decision row.
pub type FuzzyDecisionRow = DecisionRow<TriangularFuzzyNumber>;

/// Normalized and weighted fuzzy score of one (option, criterion) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyWeightedScore {
    pub option: String,
    pub criterion: String,
    pub normalized_score: TriangularFuzzyNumber,
    pub weighted_score: TriangularFuzzyNumber,
}

/// Result of a Fuzzy TOPSIS run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyTopsisOutcome {
    pub ranking: Vec<RankedOption>,
    pub weighted_scores: Vec<FuzzyWeightedScore>,
}

/// Fuzzy TOPSIS pipeline stages.
pub struct FuzzyTopsisCalculator;

impl FuzzyTopsisCalculator {
    /// Combines every decision maker's table into one.
    ///
    /// Rows are grouped by (option, criterion) in order of first appearance.
    /// Scores and weights of a group are each folded with
    /// [`Combination::Union`]. The cost flag is taken from the first row of
    /// the group.
    pub fn combine_decision_makers(
        decision_makers: &[Vec<FuzzyDecisionRow>],
    ) -> Result<Vec<FuzzyDecisionRow>, DomainError> {
        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut groups: HashMap<(&str, &str), Vec<&FuzzyDecisionRow>> = HashMap::new();

        for row in decision_makers.iter().flatten() {
            let key = (row.option.as_str(), row.criterion.as_str());
            groups
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(row);
        }

        order
            .into_iter()
            .map(|key| {
                let group = groups.get(&key).map(Vec::as_slice).unwrap_or_default();
                let scores: Vec<_> = group.iter().map(|row| row.score).collect();
                let weights: Vec<_> = group.iter().map(|row| row.weight).collect();
                let is_negative = group.first().map(|row| row.is_negative).unwrap_or(false);

                Ok(DecisionRow::new(
                    key.0,
                    key.1,
                    TriangularFuzzyNumber::combine(&scores, Combination::Union)?,
                    TriangularFuzzyNumber::combine(&weights, Combination::Union)?,
                    is_negative,
                ))
            })
            .collect()
    }

    /// Normalizes scores onto a common scale, per criterion.
    ///
    /// Benefit criteria divide by the column's largest upper bound `c*`,
    /// giving `(a/c*, b/c*, c/c*)`. Cost criteria invert against the column's
    /// smallest lower bound `a-`, giving `(a-/c, a-/b, a-/a)`.
    ///
    /// # Errors
    /// `DIVISION_BY_ZERO` when a benefit column's `c*` is 0 or a cost score
    /// has a zero component.
    pub fn normalize(rows: &[FuzzyDecisionRow]) -> Result<Vec<FuzzyDecisionRow>, DomainError> {
        let mut factors: HashMap<&str, Decimal> = HashMap::new();
        for row in rows {
            let bound = if row.is_negative { row.score.a() } else { row.score.c() };
            factors
                .entry(row.criterion.as_str())
                .and_modify(|factor| {
                    *factor = if row.is_negative {
                        (*factor).min(bound)
                    } else {
                        (*factor).max(bound)
                    }
                })
                .or_insert(bound);
        }

        rows.iter()
            .map(|row| {
                let factor = factors
                    .get(row.criterion.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let normalized = if row.is_negative {
                    row.score.reciprocal()?.scale(factor)?
                } else {
                    row.score.divide_scalar(factor).map_err(|err| {
                        err.with_detail("criterion", row.criterion.clone())
                    })?
                };
                Ok(DecisionRow::new(
                    row.option.clone(),
                    row.criterion.clone(),
                    normalized,
                    row.weight,
                    row.is_negative,
                ))
            })
            .collect()
    }

    /// Multiplies each normalized score by its fuzzy weight.
    pub fn weight(normalized: &[FuzzyDecisionRow]) -> Result<Vec<FuzzyWeightedScore>, DomainError> {
        normalized
            .iter()
            .map(|row| {
                Ok(FuzzyWeightedScore {
                    option: row.option.clone(),
                    criterion: row.criterion.clone(),
                    normalized_score: row.score,
                    weighted_score: row.score.multiply(&row.weight)?,
                })
            })
            .collect()
    }

    /// Fuzzy positive and negative ideal solutions per criterion.
    ///
    /// Cost criteria are already inverted by [`normalize`](Self::normalize),
    /// so the best is always the componentwise max and the worst the
    /// componentwise min.
    pub fn ideal_solutions(
        scores: &[FuzzyWeightedScore],
    ) -> Result<Vec<IdealSolution<TriangularFuzzyNumber>>, DomainError> {
        distinct(scores.iter().map(|s| s.criterion.as_str()))
            .into_iter()
            .map(|criterion| {
                let column: Vec<TriangularFuzzyNumber> = scores
                    .iter()
                    .filter(|s| s.criterion == criterion)
                    .map(|s| s.weighted_score)
                    .collect();
                Ok(IdealSolution {
                    best: TriangularFuzzyNumber::combine(&column, Combination::Max)?,
                    worst: TriangularFuzzyNumber::combine(&column, Combination::Min)?,
                    criterion,
                })
            })
            .collect()
    }

    /// Sums each option's fuzzy distances from the ideals across criteria.
    pub fn separation_measures(
        scores: &[FuzzyWeightedScore],
        ideals: &[IdealSolution<TriangularFuzzyNumber>],
    ) -> Result<Vec<SeparationMeasure>, DomainError> {
        const CONTEXT: &str = "fuzzy TOPSIS separation measures";

        let ideals: HashMap<&str, &IdealSolution<TriangularFuzzyNumber>> = ideals
            .iter()
            .map(|ideal| (ideal.criterion.as_str(), ideal))
            .collect();

        distinct(scores.iter().map(|s| s.option.as_str()))
            .into_iter()
            .map(|option| {
                let mut to_best = Decimal::ZERO;
                let mut to_worst = Decimal::ZERO;
                for score in scores.iter().filter(|s| s.option == option) {
                    let Some(ideal) = ideals.get(score.criterion.as_str()) else {
                        continue;
                    };
                    let best =
                        TriangularFuzzyNumber::euclidean_distance(&score.weighted_score, &ideal.best)?;
                    let worst =
                        TriangularFuzzyNumber::euclidean_distance(&score.weighted_score, &ideal.worst)?;
                    to_best = numeric::checked_add(to_best, best, CONTEXT)?;
                    to_worst = numeric::checked_add(to_worst, worst, CONTEXT)?;
                }
                Ok(SeparationMeasure {
                    option,
                    to_best,
                    to_worst,
                })
            })
            .collect()
    }

    /// Runs the full pipeline.
    pub fn calculate(
        decision_makers: &[Vec<FuzzyDecisionRow>],
    ) -> Result<FuzzyTopsisOutcome, DomainError> {
        let combined = Self::combine_decision_makers(decision_makers)?;
        let normalized = Self::normalize(&combined)?;
        let weighted_scores = Self::weight(&normalized)?;
        let ideals = Self::ideal_solutions(&weighted_scores)?;
        let separations = Self::separation_measures(&weighted_scores, &ideals)?;
        let ranking = TopsisCalculator::ranking(&separations)?;

        Ok(FuzzyTopsisOutcome {
            ranking,
            weighted_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use rust_decimal_macros::dec;

    // ─────────────────────────────────────────────────────────────────────
    // Test Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn tfn(a: i64, b: i64, c: i64) -> TriangularFuzzyNumber {
        TriangularFuzzyNumber::new(Decimal::from(a), Decimal::from(b), Decimal::from(c)).unwrap()
    }

    fn row(
        option: &str,
        criterion: &str,
        score: TriangularFuzzyNumber,
        weight: TriangularFuzzyNumber,
        is_negative: bool,
    ) -> FuzzyDecisionRow {
        DecisionRow::new(option, criterion, score, weight, is_negative)
    }

    /// Two decision makers; C has the best benefit scores and lowest costs.
    fn decision_makers() -> Vec<Vec<FuzzyDecisionRow>> {
        let first = vec![
            row("A", "C1", tfn(7, 8, 9), tfn(7, 8, 9), false),
            row("A", "C2", tfn(3, 4, 5), tfn(5, 6, 7), true),
            row("B", "C1", tfn(5, 6, 7), tfn(7, 8, 9), false),
            row("B", "C2", tfn(6, 7, 8), tfn(5, 6, 7), true),
            row("C", "C1", tfn(8, 9, 10), tfn(7, 8, 9), false),
            row("C", "C2", tfn(2, 3, 4), tfn(5, 6, 7), true),
        ];
        let second = vec![
            row("A", "C1", tfn(6, 7, 8), tfn(5, 6, 7), false),
            row("A", "C2", tfn(4, 5, 6), tfn(7, 8, 9), true),
            row("B", "C1", tfn(4, 5, 6), tfn(5, 6, 7), false),
            row("B", "C2", tfn(5, 6, 7), tfn(7, 8, 9), true),
            row("C", "C1", tfn(7, 8, 9), tfn(5, 6, 7), false),
            row("C", "C2", tfn(3, 4, 5), tfn(7, 8, 9), true),
        ];
        vec![first, second]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Combination
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn combines_each_cell_across_decision_makers() {
        let combined = FuzzyTopsisCalculator::combine_decision_makers(&decision_makers()).unwrap();

        assert_eq!(combined.len(), 6);
        assert_eq!(combined[0].option, "A");
        assert_eq!(combined[0].criterion, "C1");
        assert_eq!(
            combined[0].score,
            TriangularFuzzyNumber::new(dec!(6), dec!(7.5), dec!(9)).unwrap()
        );
        assert_eq!(
            combined[0].weight,
            TriangularFuzzyNumber::new(dec!(5), dec!(7), dec!(9)).unwrap()
        );
    }

    #[test]
    fn single_decision_maker_passes_through() {
        let only = vec![decision_makers().remove(0)];
        let combined = FuzzyTopsisCalculator::combine_decision_makers(&only).unwrap();
        assert_eq!(combined, only[0]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Normalization
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn benefit_normalization_divides_by_largest_upper_bound() {
        let rows = vec![
            row("A", "C1", tfn(2, 4, 5), tfn(1, 1, 1), false),
            row("B", "C1", tfn(5, 8, 10), tfn(1, 1, 1), false),
        ];
        let normalized = FuzzyTopsisCalculator::normalize(&rows).unwrap();

        assert_eq!(
            normalized[0].score,
            TriangularFuzzyNumber::new(dec!(0.2), dec!(0.4), dec!(0.5)).unwrap()
        );
        assert_eq!(
            normalized[1].score,
            TriangularFuzzyNumber::new(dec!(0.5), dec!(0.8), dec!(1)).unwrap()
        );
    }

    #[test]
    fn cost_normalization_inverts_against_smallest_lower_bound() {
        let rows = vec![
            row("A", "C1", tfn(2, 4, 5), tfn(1, 1, 1), true),
            row("B", "C1", tfn(4, 5, 8), tfn(1, 1, 1), true),
        ];
        let normalized = FuzzyTopsisCalculator::normalize(&rows).unwrap();

        // (a-/c, a-/b, a-/a) with a- = 2
        assert_eq!(
            normalized[0].score,
            TriangularFuzzyNumber::new(dec!(0.4), dec!(0.5), dec!(1)).unwrap()
        );
        assert_eq!(
            normalized[1].score,
            TriangularFuzzyNumber::new(dec!(0.25), dec!(0.4), dec!(0.5)).unwrap()
        );
    }

    #[test]
    fn zero_benefit_column_is_division_by_zero() {
        let rows = vec![
            row("A", "C1", tfn(0, 0, 0), tfn(1, 1, 1), false),
            row("B", "C1", tfn(0, 0, 0), tfn(1, 1, 1), false),
        ];
        let err = FuzzyTopsisCalculator::normalize(&rows).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
    }

    #[test]
    fn zero_cost_component_is_division_by_zero() {
        let rows = vec![row("A", "C1", tfn(0, 1, 2), tfn(1, 1, 1), true)];
        let err = FuzzyTopsisCalculator::normalize(&rows).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Ideal solutions
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn ideal_solutions_are_componentwise_extremes() {
        let scores = vec![
            FuzzyWeightedScore {
                option: "A".into(),
                criterion: "C1".into(),
                normalized_score: tfn(1, 2, 3),
                weighted_score: tfn(1, 2, 3),
            },
            FuzzyWeightedScore {
                option: "B".into(),
                criterion: "C1".into(),
                normalized_score: tfn(0, 4, 5),
                weighted_score: tfn(0, 4, 5),
            },
        ];
        let ideals = FuzzyTopsisCalculator::ideal_solutions(&scores).unwrap();

        assert_eq!(ideals[0].best, tfn(1, 4, 5));
        assert_eq!(ideals[0].worst, tfn(0, 2, 3));
    }

    // ─────────────────────────────────────────────────────────────────────
    // End to end
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn strongest_option_ranks_first() {
        let outcome = FuzzyTopsisCalculator::calculate(&decision_makers()).unwrap();

        assert_eq!(outcome.ranking[0].option, "C");
        assert_eq!(outcome.ranking[0].rank, dec!(1));
        assert_eq!(outcome.ranking[2].option, "B");
    }

    #[test]
    fn closeness_lies_in_unit_interval() {
        let outcome = FuzzyTopsisCalculator::calculate(&decision_makers()).unwrap();
        for ranked in &outcome.ranking {
            assert!(ranked.performance_score >= Decimal::ZERO);
            assert!(ranked.performance_score <= Decimal::ONE);
        }
    }

    #[test]
    fn calculation_is_idempotent() {
        let input = decision_makers();
        assert_eq!(
            FuzzyTopsisCalculator::calculate(&input).unwrap(),
            FuzzyTopsisCalculator::calculate(&input).unwrap()
        );
    }
}
