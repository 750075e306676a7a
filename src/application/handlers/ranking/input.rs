//! Caller input shared by the ranking commands.
//!
//! Commands arrive in wide format: one entry per criterion holding a score
//! per option. Cells are `Option`s so an unfilled cell is reported as missing
//! input instead of failing deserialization. The helpers here validate the
//! tables and melt them into the long row tables the engines consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    DecisionRow, FuzzyDecisionRow, PairwiseComparison, PreferenceFunction, PreferenceFunctions,
    ScoreRow,
};
use crate::domain::foundation::ValidationError;
use crate::domain::fuzzy::TriangularFuzzyNumber;

/// Criterion of a fuzzy method. Weights and scores come per decision maker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionInput {
    pub name: String,
    #[serde(default)]
    pub is_negative: bool,
}

/// Criterion with a crisp weight and a score per option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCriterionInput {
    pub name: String,
    #[serde(default)]
    pub is_negative: bool,
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Score per option name.
    #[serde(default)]
    pub scores: BTreeMap<String, Option<Decimal>>,
}

/// Criterion with a score per option but no weight (AHP derives weights).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCriterionInput {
    pub name: String,
    #[serde(default)]
    pub is_negative: bool,
    /// Score per option name.
    #[serde(default)]
    pub scores: BTreeMap<String, Option<Decimal>>,
}

/// One decision maker's fuzzy weights and scores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FuzzyJudgmentInput {
    /// Weight per criterion name.
    #[serde(default)]
    pub weights: BTreeMap<String, Option<TriangularFuzzyNumber>>,
    /// Score per option name, then per criterion name.
    #[serde(default)]
    pub scores: BTreeMap<String, BTreeMap<String, Option<TriangularFuzzyNumber>>>,
}

/// One upper-triangle judgment. `value` is crisp for AHP and a triple for
/// Fuzzy AHP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonInput<T> {
    pub criterion_a: String,
    pub criterion_b: String,
    pub value: Option<T>,
}

/// One decision maker's fuzzy pairwise judgments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyComparisonsInput {
    #[serde(default)]
    pub comparisons: Vec<ComparisonInput<TriangularFuzzyNumber>>,
}

/// Preference function kind as named by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceFunctionKind {
    #[default]
    Usual,
    Linear,
}

/// Preference function row for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceFunctionInput {
    pub criterion: String,
    #[serde(default)]
    pub function: PreferenceFunctionKind,
    #[serde(default)]
    pub indifference_threshold: Decimal,
    #[serde(default)]
    pub preference_threshold: Decimal,
}

// ════════════════════════════════════════════════════════════════════════════════
// Validation
// ════════════════════════════════════════════════════════════════════════════════

/// Checks a list of names: non-empty, no blanks, no duplicates, at most `max`.
pub fn validate_names<'a>(
    field: &str,
    names: impl IntoIterator<Item = &'a str>,
    max: usize,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{} name", field)));
        }
        if !seen.insert(name) {
            return Err(ValidationError::duplicate_value(field, name));
        }
    }
    if seen.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if seen.len() > max {
        return Err(ValidationError::out_of_range(field, 1, max, seen.len()));
    }
    Ok(())
}

/// Validates option and criterion names against the configured limits.
pub fn validate_problem<'a>(
    config: &AnalysisConfig,
    options: &[String],
    criteria: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    validate_names("options", options.iter().map(String::as_str), config.max_options)?;
    validate_names("criteria", criteria, config.max_criteria)
}

/// Rejects map keys that are not in `known`.
fn check_keys<'a>(
    field: &str,
    keys: impl IntoIterator<Item = &'a String>,
    known: &[&str],
) -> Result<(), ValidationError> {
    for key in keys {
        if !known.contains(&key.as_str()) {
            return Err(ValidationError::unknown_reference(field, key));
        }
    }
    Ok(())
}

fn cell_key(option: &str, criterion: &str) -> String {
    format!("{} / {}", option, criterion)
}

// ════════════════════════════════════════════════════════════════════════════════
// Melting
// ════════════════════════════════════════════════════════════════════════════════

/// Melts weighted criteria into one decision row per (option, criterion).
pub fn melt_weighted(
    options: &[String],
    criteria: &[WeightedCriterionInput],
) -> Result<Vec<DecisionRow<Decimal>>, ValidationError> {
    let known: Vec<&str> = options.iter().map(String::as_str).collect();
    let mut rows = Vec::with_capacity(options.len() * criteria.len());

    for option in options {
        for criterion in criteria {
            check_keys("scores", criterion.scores.keys(), &known)?;
            let weight = criterion
                .weight
                .ok_or_else(|| ValidationError::missing_value("weight", &criterion.name))?;
            let score = criterion
                .scores
                .get(option)
                .copied()
                .flatten()
                .ok_or_else(|| ValidationError::missing_value("score", cell_key(option, &criterion.name)))?;
            rows.push(DecisionRow::new(
                option.clone(),
                criterion.name.clone(),
                score,
                weight,
                criterion.is_negative,
            ));
        }
    }
    Ok(rows)
}

/// Melts scored criteria into one score row per (option, criterion).
pub fn melt_scores(
    options: &[String],
    criteria: &[ScoredCriterionInput],
) -> Result<Vec<ScoreRow<Decimal>>, ValidationError> {
    let known: Vec<&str> = options.iter().map(String::as_str).collect();
    let mut rows = Vec::with_capacity(options.len() * criteria.len());

    for option in options {
        for criterion in criteria {
            check_keys("scores", criterion.scores.keys(), &known)?;
            let score = criterion
                .scores
                .get(option)
                .copied()
                .flatten()
                .ok_or_else(|| ValidationError::missing_value("score", cell_key(option, &criterion.name)))?;
            rows.push(ScoreRow::new(
                option.clone(),
                criterion.name.clone(),
                score,
                criterion.is_negative,
            ));
        }
    }
    Ok(rows)
}

/// Melts each decision maker's judgments into its own fuzzy row table.
pub fn melt_fuzzy(
    options: &[String],
    criteria: &[CriterionInput],
    decision_makers: &[FuzzyJudgmentInput],
) -> Result<Vec<Vec<FuzzyDecisionRow>>, ValidationError> {
    if decision_makers.is_empty() {
        return Err(ValidationError::empty_field("decision_makers"));
    }
    let known_options: Vec<&str> = options.iter().map(String::as_str).collect();
    let known_criteria: Vec<&str> = criteria.iter().map(|c| c.name.as_str()).collect();

    decision_makers
        .iter()
        .enumerate()
        .map(|(index, judgment)| {
            let maker = format!("decision maker {}", index + 1);
            check_keys("weights", judgment.weights.keys(), &known_criteria)?;
            check_keys("scores", judgment.scores.keys(), &known_options)?;
            for by_criterion in judgment.scores.values() {
                check_keys("scores", by_criterion.keys(), &known_criteria)?;
            }

            let mut rows = Vec::with_capacity(options.len() * criteria.len());
            for option in options {
                for criterion in criteria {
                    let weight = judgment
                        .weights
                        .get(&criterion.name)
                        .copied()
                        .flatten()
                        .ok_or_else(|| {
                            ValidationError::missing_value("weight", cell_key(&maker, &criterion.name))
                        })?;
                    let score = judgment
                        .scores
                        .get(option)
                        .and_then(|by_criterion| by_criterion.get(&criterion.name))
                        .copied()
                        .flatten()
                        .ok_or_else(|| {
                            ValidationError::missing_value(
                                "score",
                                format!("{} / {}", maker, cell_key(option, &criterion.name)),
                            )
                        })?;
                    rows.push(DecisionRow::new(
                        option.clone(),
                        criterion.name.clone(),
                        score,
                        weight,
                        criterion.is_negative,
                    ));
                }
            }
            Ok(rows)
        })
        .collect()
}

/// Unwraps judgments, reporting the first one left blank.
pub fn comparisons<T: Copy>(
    inputs: &[ComparisonInput<T>],
) -> Result<Vec<PairwiseComparison<T>>, ValidationError> {
    inputs
        .iter()
        .map(|input| {
            let value = input.value.ok_or_else(|| {
                ValidationError::missing_value(
                    "comparison",
                    format!("{} / {}", input.criterion_a, input.criterion_b),
                )
            })?;
            Ok(PairwiseComparison::new(
                input.criterion_a.clone(),
                input.criterion_b.clone(),
                value,
            ))
        })
        .collect()
}

/// Converts preference function rows, keyed by criterion.
///
/// Returns `None` when no rows are given, so every criterion uses the usual
/// function.
pub fn preference_functions(
    criteria: &[&str],
    inputs: &[PreferenceFunctionInput],
) -> Result<Option<PreferenceFunctions>, ValidationError> {
    if inputs.is_empty() {
        return Ok(None);
    }

    let mut functions = PreferenceFunctions::with_capacity(inputs.len());
    for input in inputs {
        if !criteria.contains(&input.criterion.as_str()) {
            return Err(ValidationError::unknown_reference(
                "preference_functions",
                &input.criterion,
            ));
        }
        for (field, value) in [
            ("indifference_threshold", input.indifference_threshold),
            ("preference_threshold", input.preference_threshold),
        ] {
            if value < Decimal::ZERO {
                return Err(ValidationError::out_of_range(field, 0, "infinity", value));
            }
        }

        let function = match input.function {
            PreferenceFunctionKind::Usual => PreferenceFunction::Usual,
            PreferenceFunctionKind::Linear => PreferenceFunction::Linear {
                indifference_threshold: input.indifference_threshold,
                preference_threshold: input.preference_threshold,
            },
        };
        if functions.insert(input.criterion.clone(), function).is_some() {
            return Err(ValidationError::duplicate_value(
                "preference_functions",
                &input.criterion,
            ));
        }
    }
    Ok(Some(functions))
}
