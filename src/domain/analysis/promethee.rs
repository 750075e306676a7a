//! PROMETHEE II - Ranking by net outranking flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ranking::{rank_descending, RankedOption};
use super::table::{distinct, DecisionRow};
use crate::domain::foundation::numeric;
use crate::domain::foundation::DomainError;

/// Generalized criterion turning a deviation into a preference degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "lowercase")]
pub enum PreferenceFunction {
    /// Any positive deviation is full preference.
    #[default]
    Usual,
    /// Type V: no preference up to `q`, full preference from `p`, linear in
    /// between.
    Linear {
        indifference_threshold: Decimal,
        preference_threshold: Decimal,
    },
}

impl PreferenceFunction {
    /// Preference degree in `[0, 1]` for a deviation.
    ///
    /// For `Linear` the checks run in order: `d <= q` gives 0, then `d >= p`
    /// gives 1. With `p <= q` the function is a step at `q` and the ramp is
    /// never reached.
    pub fn preference(&self, deviation: Decimal) -> Result<Decimal, DomainError> {
        match *self {
            PreferenceFunction::Usual => Ok(if deviation > Decimal::ZERO {
                Decimal::ONE
            } else {
                Decimal::ZERO
            }),
            PreferenceFunction::Linear {
                indifference_threshold: q,
                preference_threshold: p,
            } => {
                if deviation <= q {
                    Ok(Decimal::ZERO)
                } else if deviation >= p {
                    Ok(Decimal::ONE)
                } else {
                    numeric::checked_div(deviation - q, p - q, "linear preference function")
                }
            }
        }
    }
}

/// Preference function per criterion. Criteria without an entry use
/// [`PreferenceFunction::Usual`].
pub type PreferenceFunctions = HashMap<String, PreferenceFunction>;

/// Deviation of option A over option B on one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    pub option_a: String,
    pub option_b: String,
    pub criterion: String,
    pub weight: Decimal,
    pub deviation: Decimal,
}

/// Preference degree of option A over option B on one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDegree {
    pub option_a: String,
    pub option_b: String,
    pub criterion: String,
    pub weight: Decimal,
    pub degree: Decimal,
}

/// Aggregated preference index `π(A, B)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwisePreference {
    pub option_a: String,
    pub option_b: String,
    pub index: Decimal,
}

/// Leaving, entering and net flow of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutrankingFlow {
    pub option: String,
    /// `Φ+`
    pub leaving: Decimal,
    /// `Φ-`
    pub entering: Decimal,
    /// `Φ = Φ+ - Φ-`
    pub net: Decimal,
}

/// Result of a PROMETHEE run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrometheeOutcome {
    pub ranking: Vec<RankedOption>,
    pub flows: Vec<OutrankingFlow>,
}

/// PROMETHEE II pipeline stages.
pub struct PrometheeCalculator;

impl PrometheeCalculator {
    /// Deviations for every ordered pair of distinct options sharing a
    /// criterion.
    ///
    /// Benefit criteria give `score(A) - score(B)`; cost criteria give
    /// `score(B) - score(A)`.
    pub fn deviations(rows: &[DecisionRow<Decimal>]) -> Vec<Deviation> {
        let mut deviations = Vec::new();
        for a in rows {
            for b in rows
                .iter()
                .filter(|b| b.criterion == a.criterion && b.option != a.option)
            {
                let deviation = if a.is_negative {
                    b.score - a.score
                } else {
                    a.score - b.score
                };
                deviations.push(Deviation {
                    option_a: a.option.clone(),
                    option_b: b.option.clone(),
                    criterion: a.criterion.clone(),
                    weight: a.weight,
                    deviation,
                });
            }
        }
        deviations
    }

    /// Applies each criterion's preference function to its deviations.
    ///
    /// `None` applies the usual function everywhere.
    pub fn preference_degrees(
        deviations: &[Deviation],
        functions: Option<&PreferenceFunctions>,
    ) -> Result<Vec<PreferenceDegree>, DomainError> {
        deviations
            .iter()
            .map(|d| {
                let function = functions
                    .and_then(|f| f.get(&d.criterion))
                    .copied()
                    .unwrap_or_default();
                Ok(PreferenceDegree {
                    option_a: d.option_a.clone(),
                    option_b: d.option_b.clone(),
                    criterion: d.criterion.clone(),
                    weight: d.weight,
                    degree: function.preference(d.deviation)?,
                })
            })
            .collect()
    }

    /// Weighted average of preference degrees per ordered pair:
    /// `π(A, B) = Σ w_j P_j(A, B) / Σ w_j`.
    ///
    /// # Errors
    /// `DIVISION_BY_ZERO` when a pair's weights sum to 0.
    pub fn aggregated_preference_index(
        degrees: &[PreferenceDegree],
    ) -> Result<Vec<PairwisePreference>, DomainError> {
        const CONTEXT: &str = "aggregated preference index";

        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut sums: HashMap<(&str, &str), (Decimal, Decimal)> = HashMap::new();
        for degree in degrees {
            let key = (degree.option_a.as_str(), degree.option_b.as_str());
            let (weighted, weights) = sums.entry(key).or_insert_with(|| {
                order.push(key);
                (Decimal::ZERO, Decimal::ZERO)
            });
            let product = numeric::checked_mul(degree.weight, degree.degree, CONTEXT)?;
            *weighted = numeric::checked_add(*weighted, product, CONTEXT)?;
            *weights = numeric::checked_add(*weights, degree.weight, CONTEXT)?;
        }

        order
            .into_iter()
            .map(|key| {
                let (weighted, weights) = sums.get(&key).copied().unwrap_or_default();
                Ok(PairwisePreference {
                    option_a: key.0.to_string(),
                    option_b: key.1.to_string(),
                    index: numeric::checked_div(weighted, weights, CONTEXT)?,
                })
            })
            .collect()
    }

    /// Leaving, entering and net flows for `options`.
    ///
    /// Both flows are averaged over the `n - 1` opponents. A single option has
    /// no opponents and all of its flows are 0.
    pub fn flows(
        preferences: &[PairwisePreference],
        options: &[String],
    ) -> Result<Vec<OutrankingFlow>, DomainError> {
        const CONTEXT: &str = "outranking flows";

        let mut outgoing: HashMap<&str, Decimal> = HashMap::new();
        let mut incoming: HashMap<&str, Decimal> = HashMap::new();
        for preference in preferences {
            let out = outgoing.entry(preference.option_a.as_str()).or_default();
            *out = numeric::checked_add(*out, preference.index, CONTEXT)?;
            let into = incoming.entry(preference.option_b.as_str()).or_default();
            *into = numeric::checked_add(*into, preference.index, CONTEXT)?;
        }

        let opponents = Decimal::from(options.len().saturating_sub(1));
        options
            .iter()
            .map(|option| {
                let (leaving, entering) = if opponents.is_zero() {
                    (Decimal::ZERO, Decimal::ZERO)
                } else {
                    let total_out = outgoing.get(option.as_str()).copied().unwrap_or_default();
                    let total_in = incoming.get(option.as_str()).copied().unwrap_or_default();
                    (
                        numeric::checked_div(total_out, opponents, CONTEXT)?,
                        numeric::checked_div(total_in, opponents, CONTEXT)?,
                    )
                };
                Ok(OutrankingFlow {
                    option: option.clone(),
                    leaving,
                    entering,
                    net: leaving - entering,
                })
            })
            .collect()
    }

    /// Ranks options by net flow, highest first.
    pub fn ranking(flows: &[OutrankingFlow]) -> Vec<RankedOption> {
        rank_descending(
            flows
                .iter()
                .map(|flow| (flow.option.clone(), flow.net))
                .collect(),
        )
    }

    /// Runs the full pipeline.
    pub fn calculate(
        rows: &[DecisionRow<Decimal>],
        functions: Option<&PreferenceFunctions>,
    ) -> Result<PrometheeOutcome, DomainError> {
        let options = distinct(rows.iter().map(|row| row.option.as_str()));
        let deviations = Self::deviations(rows);
        let degrees = Self::preference_degrees(&deviations, functions)?;
        let preferences = Self::aggregated_preference_index(&degrees)?;
        let flows = Self::flows(&preferences, &options)?;
        let ranking = Self::ranking(&flows);

        Ok(PrometheeOutcome { ranking, flows })
    }
}
