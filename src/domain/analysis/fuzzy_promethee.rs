//! Fuzzy PROMETHEE - Outranking flows over defuzzified fuzzy scores.

use rust_decimal::Decimal;

use super::fuzzy_topsis::{FuzzyDecisionRow, FuzzyTopsisCalculator};
use super::promethee::{PreferenceFunctions, PrometheeCalculator, PrometheeOutcome};
use super::table::DecisionRow;
use crate::domain::foundation::DomainError;

/// Fuzzy PROMETHEE pipeline stages.
///
/// Decision makers are combined exactly as in Fuzzy TOPSIS. Each combined
/// score and weight is then collapsed to its centroid, so deviations,
/// preference functions and weights all operate on crisp values and the
/// PROMETHEE II stages apply unchanged.
pub struct FuzzyPrometheeCalculator;

impl FuzzyPrometheeCalculator {
    /// Centroid of every combined score and weight.
    pub fn defuzzify(
        combined: &[FuzzyDecisionRow],
    ) -> Result<Vec<DecisionRow<Decimal>>, DomainError> {
        combined
            .iter()
            .map(|row| {
                Ok(DecisionRow::new(
                    row.option.clone(),
                    row.criterion.clone(),
                    row.score.centroid()?,
                    row.weight.centroid()?,
                    row.is_negative,
                ))
            })
            .collect()
    }

    /// Runs the full pipeline.
    pub fn calculate(
        decision_makers: &[Vec<FuzzyDecisionRow>],
        functions: Option<&PreferenceFunctions>,
    ) -> Result<PrometheeOutcome, DomainError> {
        let combined = FuzzyTopsisCalculator::combine_decision_makers(decision_makers)?;
        let crisp = Self::defuzzify(&combined)?;
        PrometheeCalculator::calculate(&crisp, functions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::PreferenceFunction;
    use crate::domain::fuzzy::TriangularFuzzyNumber;
    use rust_decimal_macros::dec;

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

    fn decision_makers() -> Vec<Vec<FuzzyDecisionRow>> {
        let first = vec![
            row("A", "C1", tfn(7, 8, 9), tfn(7, 8, 9), false),
            row("A", "C2", tfn(3, 4, 5), tfn(5, 6, 7), true),
            row("B", "C1", tfn(5, 6, 7), tfn(7, 8, 9), false),
            row("B", "C2", tfn(6, 7, 8), tfn(5, 6, 7), true),
            row("C", "C1", tfn(3, 4, 5), tfn(7, 8, 9), false),
            row("C", "C2", tfn(1, 2, 3), tfn(5, 6, 7), true),
        ];
        let second = vec![
            row("A", "C1", tfn(6, 7, 8), tfn(5, 6, 7), false),
            row("A", "C2", tfn(4, 5, 6), tfn(7, 8, 9), true),
            row("B", "C1", tfn(4, 5, 6), tfn(5, 6, 7), false),
            row("B", "C2", tfn(5, 6, 7), tfn(7, 8, 9), true),
            row("C", "C1", tfn(4, 5, 6), tfn(5, 6, 7), false),
            row("C", "C2", tfn(2, 3, 4), tfn(7, 8, 9), true),
        ];
        vec![first, second]
    }

    #[test]
    fn defuzzify_takes_centroids() {
        let rows = vec![row("A", "C1", tfn(1, 2, 6), tfn(3, 3, 3), true)];
        let crisp = FuzzyPrometheeCalculator::defuzzify(&rows).unwrap();

        assert_eq!(crisp[0].score, dec!(3));
        assert_eq!(crisp[0].weight, dec!(3));
        assert!(crisp[0].is_negative);
    }

    #[test]
    fn net_flows_sum_to_zero() {
        let outcome = FuzzyPrometheeCalculator::calculate(&decision_makers(), None).unwrap();

        let total: Decimal = outcome.flows.iter().map(|f| f.net).sum();
        assert!(total.abs() < dec!(0.0000000001));
        assert_eq!(outcome.ranking.len(), 3);
    }

    #[test]
    fn usual_preference_ranks_options() {
        let outcome = FuzzyPrometheeCalculator::calculate(&decision_makers(), None).unwrap();

        // A beats B on both criteria
        let a = outcome.ranking.iter().find(|r| r.option == "A").unwrap();
        let b = outcome.ranking.iter().find(|r| r.option == "B").unwrap();
        assert!(a.rank < b.rank);
        assert!(outcome.ranking.iter().all(|r| r.rank >= dec!(1) && r.rank <= dec!(3)));
    }

    #[test]
    fn linear_preference_changes_flows() {
        let functions = PreferenceFunctions::from([(
            "C1".to_string(),
            PreferenceFunction::Linear {
                indifference_threshold: dec!(0.5),
                preference_threshold: dec!(3),
            },
        )]);
        let usual = FuzzyPrometheeCalculator::calculate(&decision_makers(), None).unwrap();
        let linear =
            FuzzyPrometheeCalculator::calculate(&decision_makers(), Some(&functions)).unwrap();

        assert_ne!(usual.flows, linear.flows);
        let total: Decimal = linear.flows.iter().map(|f| f.net).sum();
        assert!(total.abs() < dec!(0.0000000001));
    }
}
