//! RankWithFuzzyPrometheeHandler - PROMETHEE II over defuzzified fuzzy
//! judgments of several decision makers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::{
    melt_fuzzy, preference_functions, validate_problem, CriterionInput, FuzzyJudgmentInput,
    PreferenceFunctionInput,
};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{FuzzyPrometheeCalculator, PrometheeOutcome};
use crate::domain::foundation::DomainError;

/// Command to rank options with Fuzzy PROMETHEE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWithFuzzyPrometheeCommand {
    pub options: Vec<String>,
    pub criteria: Vec<CriterionInput>,
    pub decision_makers: Vec<FuzzyJudgmentInput>,
    /// Thresholds apply to the defuzzified deviations.
    #[serde(default)]
    pub preference_functions: Vec<PreferenceFunctionInput>,
}

/// Result of a Fuzzy PROMETHEE ranking.
pub type RankWithFuzzyPrometheeResult = PrometheeOutcome;

/// Handler for Fuzzy PROMETHEE rankings.
pub struct RankWithFuzzyPrometheeHandler {
    config: AnalysisConfig,
}

impl RankWithFuzzyPrometheeHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: RankWithFuzzyPrometheeCommand,
    ) -> Result<RankWithFuzzyPrometheeResult, DomainError> {
        self.rank(&cmd).inspect_err(|err| {
            warn!(method = "fuzzy_promethee", error = %err, "Rejected ranking request");
        })
    }

    fn rank(
        &self,
        cmd: &RankWithFuzzyPrometheeCommand,
    ) -> Result<RankWithFuzzyPrometheeResult, DomainError> {
        let criteria: Vec<&str> = cmd.criteria.iter().map(|c| c.name.as_str()).collect();
        validate_problem(&self.config, &cmd.options, criteria.iter().copied())?;
        let functions = preference_functions(&criteria, &cmd.preference_functions)?;
        let tables = melt_fuzzy(&cmd.options, &cmd.criteria, &cmd.decision_makers)?;
        let outcome = FuzzyPrometheeCalculator::calculate(&tables, functions.as_ref())?;

        debug!(
            method = "fuzzy_promethee",
            options = cmd.options.len(),
            criteria = criteria.len(),
            decision_makers = tables.len(),
            best = outcome.ranking.first().map(|r| r.option.as_str()).unwrap_or_default(),
            "Ranking computed"
        );
        Ok(outcome)
    }
}
