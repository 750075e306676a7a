//! Analysis configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::DEFAULT_CONSISTENCY_THRESHOLD;

/// Limits and thresholds applied to ranking requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisConfig {
    /// AHP results with a consistency ratio at or above this are flagged
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: Decimal,

    /// Maximum number of options per request
    #[serde(default = "default_max_options")]
    pub max_options: usize,

    /// Maximum number of criteria per request
    #[serde(default = "default_max_criteria")]
    pub max_criteria: usize,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.consistency_threshold <= Decimal::ZERO || self.consistency_threshold > Decimal::ONE {
            return Err(ValidationError::InvalidConsistencyThreshold);
        }
        if self.max_options == 0 {
            return Err(ValidationError::InvalidLimit("max_options"));
        }
        if self.max_criteria == 0 {
            return Err(ValidationError::InvalidLimit("max_criteria"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            max_options: default_max_options(),
            max_criteria: default_max_criteria(),
        }
    }
}

fn default_consistency_threshold() -> Decimal {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_max_options() -> usize {
    100
}

fn default_max_criteria() -> usize {
    50
}
