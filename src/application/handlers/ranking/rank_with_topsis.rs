//! RankWithTopsisHandler - Ranks options by closeness to the ideal solution.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{melt_weighted, validate_problem, WeightedCriterionInput};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{TopsisCalculator, TopsisOutcome};
use crate::domain::foundation::DomainError;

/// Command to rank options with TOPSIS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithTopsisCommand {
    pub options: Vec<String>,
    pub criteria: Vec<WeightedCriterionInput>,
}

/// Result of a TOPSIS ranking.
pub type RankWithTopsisResult = TopsisOutcome;

/// Handler for TOPSIS rankings.
pub struct RankWithTopsisHandler {
    config: AnalysisConfig,
}

impl RankWithTopsisHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, cmd: RankWithTopsisCommand) -> Result<RankWithTopsisResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "topsis", error = %err, "Rejected ranking request");
        })
    }

    fn rank(&self, cmd: &RankWithTopsisCommand) -> Result<RankWithTopsisResult, DomainError> {
        validate_problem(
            &self.config,
            &cmd.options,
            cmd.criteria.iter().map(|c| c.name.as_str()),
        )?;
        let rows = melt_weighted(&cmd.options, &cmd.criteria)?;
        let outcome = TopsisCalculator::calculate(&rows)?;

        debug!(
            method = "topsis",
            options = cmd.options.len(),
            criteria = cmd.criteria.len(),
            best = outcome.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(outcome)
    }
}
