//! RankWithAhpHandler - Derives criterion weights from pairwise comparisons
//! and ranks options by weighted sum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{
    comparisons, melt_scores, validate_problem, ComparisonInput, ScoredCriterionInput,
};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    AhpCalculator, AhpOutcome, AhpWeightedScore, ComparisonMatrix, CriterionWeight, RankedOption,
};
use crate::domain::foundation::DomainError;

/// Command to rank options with AHP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithAhpCommand {
    pub options: Vec<String>,
    pub criteria: Vec<ScoredCriterionInput>,
    /// Upper-triangle judgments. Pairs left out count as equally important.
    #[serde(default)]
    pub comparisons: Vec<ComparisonInput<Decimal>>,
}

/// Ranking plus the consistency verdict for AHP and Fuzzy AHP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhpRankingResult {
    pub ranking: Vec<RankedOption>,
    pub weights: Vec<CriterionWeight>,
    pub consistency_ratio: Decimal,
    pub is_consistent: bool,
    pub consistency_threshold: Decimal,
    pub weighted_scores: Vec<AhpWeightedScore>,
}

impl AhpRankingResult {
    pub(crate) fn from_outcome(outcome: AhpOutcome, threshold: Decimal) -> Self {
        Self {
            is_consistent: outcome.is_consistent(threshold),
            consistency_threshold: threshold,
            ranking: outcome.ranking,
            weights: outcome.weights,
            consistency_ratio: outcome.consistency_ratio,
            weighted_scores: outcome.weighted_scores,
        }
    }
}

/// Result of an AHP ranking.
pub type RankWithAhpResult = AhpRankingResult;

/// Handler for AHP rankings.
pub struct RankWithAhpHandler {
    config: AnalysisConfig,
}

impl RankWithAhpHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, cmd: RankWithAhpCommand) -> Result<RankWithAhpResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "ahp", error = %err, "Rejected ranking request");
        })
    }

    fn rank(&self, cmd: &RankWithAhpCommand) -> Result<RankWithAhpResult, DomainError> {
        let criteria: Vec<String> = cmd.criteria.iter().map(|c| c.name.clone()).collect();
        validate_problem(&self.config, &cmd.options, criteria.iter().map(String::as_str))?;
        let matrix = ComparisonMatrix::from_pairs(criteria, &comparisons(&cmd.comparisons)?)?;
        let scores = melt_scores(&cmd.options, &cmd.criteria)?;
        let outcome = AhpCalculator::calculate(&matrix, &scores)?;
        let result = AhpRankingResult::from_outcome(outcome, self.config.consistency_threshold);

        debug!(
            method = "ahp",
            options = cmd.options.len(),
            criteria = matrix.size(),
            consistency_ratio = %result.consistency_ratio,
            is_consistent = result.is_consistent,
            best = result.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use rust_decimal_macros::dec;

    fn criterion(name: &str, is_negative: bool, scores: [Decimal; 3]) -> ScoredCriterionInput {
        ScoredCriterionInput {
            name: name.to_string(),
            is_negative,
            scores: ["Laptop A", "Laptop B", "Laptop C"]
                .into_iter()
                .zip(scores)
                .map(|(option, score)| (option.to_string(), Some(score)))
                .collect(),
        }
    }

    fn judgment(a: &str, b: &str, value: Decimal) -> ComparisonInput<Decimal> {
        ComparisonInput {
            criterion_a: a.to_string(),
            criterion_b: b.to_string(),
            value: Some(value),
        }
    }

    fn laptop_command() -> RankWithAhpCommand {
        RankWithAhpCommand {
            options: vec!["Laptop A".into(), "Laptop B".into(), "Laptop C".into()],
            criteria: vec![
                criterion("Price", true, [dec!(999), dec!(1299), dec!(799)]),
                criterion("Performance", false, [dec!(85), dec!(95), dec!(70)]),
                criterion("Battery", false, [dec!(8), dec!(6), dec!(10)]),
            ],
            comparisons: vec![
                judgment("Price", "Performance", dec!(3)),
                judgment("Price", "Battery", dec!(5)),
                judgment("Performance", "Battery", dec!(3)),
            ],
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal) {
        assert!(
            (actual - expected).abs() < dec!(0.001),
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Success Cases
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn ranks_laptops_with_consistent_judgments() {
        crate::logging::init_test();
        let handler = RankWithAhpHandler::new(AnalysisConfig::default());
        let result = handler.handle(laptop_command()).unwrap();

        assert_close(result.weights[0].weight, dec!(0.637));
        assert_close(result.consistency_ratio, dec!(0.033));
        assert!(result.is_consistent);
        assert_eq!(result.consistency_threshold, dec!(0.10));

        let order: Vec<&str> = result.ranking.iter().map(|r| r.option.as_str()).collect();
        assert_eq!(order, vec!["Laptop C", "Laptop A", "Laptop B"]);
    }

    #[test]
    fn stricter_threshold_flags_inconsistency() {
        let config = AnalysisConfig {
            consistency_threshold: dec!(0.01),
            ..AnalysisConfig::default()
        };
        let handler = RankWithAhpHandler::new(config);
        let result = handler.handle(laptop_command()).unwrap();

        assert!(!result.is_consistent);
    }

    #[test]
    fn omitted_comparisons_mean_equal_weights() {
        let mut cmd = laptop_command();
        cmd.comparisons.clear();

        let handler = RankWithAhpHandler::new(AnalysisConfig::default());
        let result = handler.handle(cmd).unwrap();

        for weight in &result.weights {
            assert_close(weight.weight, dec!(0.333));
        }
        assert_close(result.consistency_ratio, Decimal::ZERO);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Validation Cases
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn rejects_comparison_with_unknown_criterion() {
        let mut cmd = laptop_command();
        cmd.comparisons.push(judgment("Price", "Weight", dec!(2)));

        let handler = RankWithAhpHandler::new(AnalysisConfig::default());
        let err = handler.handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingInput);
    }

    #[test]
    fn rejects_non_positive_judgment() {
        let mut cmd = laptop_command();
        cmd.comparisons[0].value = Some(Decimal::ZERO);

        let handler = RankWithAhpHandler::new(AnalysisConfig::default());
        let err = handler.handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn zero_cost_score_is_a_numeric_error() {
        let mut cmd = laptop_command();
        cmd.criteria[0].scores.insert("Laptop A".into(), Some(Decimal::ZERO));

        let handler = RankWithAhpHandler::new(AnalysisConfig::default());
        let err = handler.handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
    }
}
