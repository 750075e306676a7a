//! RankWithFuzzyAhpHandler - Buckley's fuzzy AHP over several decision
//! makers' fuzzy pairwise comparisons.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{
    comparisons, melt_scores, validate_problem, FuzzyComparisonsInput, ScoredCriterionInput,
};
use super::rank_with_ahp::AhpRankingResult;
use crate::config::AnalysisConfig;
use crate::domain::analysis::{FuzzyAhpCalculator, FuzzyComparisonMatrix};
use crate::domain::foundation::{DomainError, ValidationError};

/// Command to rank options with Fuzzy AHP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithFuzzyAhpCommand {
    pub options: Vec<String>,
    pub criteria: Vec<ScoredCriterionInput>,
    pub decision_makers: Vec<FuzzyComparisonsInput>,
}

/// Result of a Fuzzy AHP ranking.
pub type RankWithFuzzyAhpResult = AhpRankingResult;

/// Handler for Fuzzy AHP rankings.
pub struct RankWithFuzzyAhpHandler {
    config: AnalysisConfig,
}

impl RankWithFuzzyAhpHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: RankWithFuzzyAhpCommand,
    ) -> Result<RankWithFuzzyAhpResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "fuzzy_ahp", error = %err, "Rejected ranking request");
        })
    }

    fn rank(&self, cmd: &RankWithFuzzyAhpCommand) -> Result<RankWithFuzzyAhpResult, DomainError> {
        let criteria: Vec<String> = cmd.criteria.iter().map(|c| c.name.clone()).collect();
        validate_problem(&self.config, &cmd.options, criteria.iter().map(String::as_str))?;
        if cmd.decision_makers.is_empty() {
            return Err(ValidationError::empty_field("decision_makers").into());
        }

        let matrices = cmd
            .decision_makers
            .iter()
            .map(|maker| {
                FuzzyComparisonMatrix::from_pairs(criteria.clone(), &comparisons(&maker.comparisons)?)
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        let scores = melt_scores(&cmd.options, &cmd.criteria)?;
        let outcome = FuzzyAhpCalculator::calculate(&matrices, &scores)?;
        let result = AhpRankingResult::from_outcome(outcome, self.config.consistency_threshold);

        debug!(
            method = "fuzzy_ahp",
            options = cmd.options.len(),
            criteria = criteria.len(),
            decision_makers = matrices.len(),
            consistency_ratio = %result.consistency_ratio,
            is_consistent = result.is_consistent,
            best = result.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(result)
    }
}
