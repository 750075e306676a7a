//! RankWithPrometheeHandler - Ranks options by PROMETHEE II net flow.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{
    melt_weighted, preference_functions, validate_problem, PreferenceFunctionInput,
    WeightedCriterionInput,
};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{PrometheeCalculator, PrometheeOutcome};
use crate::domain::foundation::DomainError;

/// Command to rank options with PROMETHEE II.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithPrometheeCommand {
    pub options: Vec<String>,
    pub criteria: Vec<WeightedCriterionInput>,
    /// Criteria without a row use the usual preference function.
    #[serde(default)]
    pub preference_functions: Vec<PreferenceFunctionInput>,
}

/// Result of a PROMETHEE II ranking.
pub type RankWithPrometheeResult = PrometheeOutcome;

/// Handler for PROMETHEE II rankings.
pub struct RankWithPrometheeHandler {
    config: AnalysisConfig,
}

impl RankWithPrometheeHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: RankWithPrometheeCommand,
    ) -> Result<RankWithPrometheeResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "promethee", error = %err, "Rejected ranking request");
        })
    }

    fn rank(&self, cmd: &RankWithPrometheeCommand) -> Result<RankWithPrometheeResult, DomainError> {
        let criteria: Vec<&str> = cmd.criteria.iter().map(|c| c.name.as_str()).collect();
        validate_problem(&self.config, &cmd.options, criteria.iter().copied())?;
        let functions = preference_functions(&criteria, &cmd.preference_functions)?;
        let rows = melt_weighted(&cmd.options, &cmd.criteria)?;
        let outcome = PrometheeCalculator::calculate(&rows, functions.as_ref())?;

        debug!(
            method = "promethee",
            options = cmd.options.len(),
            criteria = criteria.len(),
            preference_functions = cmd.preference_functions.len(),
            best = outcome.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(outcome)
    }
}
