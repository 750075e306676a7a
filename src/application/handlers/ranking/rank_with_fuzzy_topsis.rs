//! RankWithFuzzyTopsisHandler - TOPSIS over fuzzy judgments of several
//! decision makers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{melt_fuzzy, validate_problem, CriterionInput, FuzzyJudgmentInput};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{FuzzyTopsisCalculator, FuzzyTopsisOutcome};
use crate::domain::foundation::DomainError;

/// Command to rank options with Fuzzy TOPSIS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithFuzzyTopsisCommand {
    pub options: Vec<String>,
    pub criteria: Vec<CriterionInput>,
    pub decision_makers: Vec<FuzzyJudgmentInput>,
}

/// Result of a Fuzzy TOPSIS ranking.
pub type RankWithFuzzyTopsisResult = FuzzyTopsisOutcome;

/// Handler for Fuzzy TOPSIS rankings.
pub struct RankWithFuzzyTopsisHandler {
    config: AnalysisConfig,
}

impl RankWithFuzzyTopsisHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: RankWithFuzzyTopsisCommand,
    ) -> Result<RankWithFuzzyTopsisResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "fuzzy_topsis", error = %err, "Rejected ranking request");
        })
    }

    fn rank(&self, cmd: &RankWithFuzzyTopsisCommand) -> Result<RankWithFuzzyTopsisResult, DomainError> {
        validate_problem(
            &self.config,
            &cmd.options,
            cmd.criteria.iter().map(|c| c.name.as_str()),
        )?;
        let tables = melt_fuzzy(&cmd.options, &cmd.criteria, &cmd.decision_makers)?;
        let outcome = FuzzyTopsisCalculator::calculate(&tables)?;

        debug!(
            method = "fuzzy_topsis",
            options = cmd.options.len(),
            criteria = cmd.criteria.len(),
            decision_makers = tables.len(),
            best = outcome.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(outcome)
    }
}
