//! Ready-to-POST example requests, one per ranking method.
//!
//! Every example ranks the same three laptops so results can be compared
//! across methods.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::application::handlers::ranking::{
    ComparisonInput, CriterionInput, FuzzyComparisonsInput, FuzzyJudgmentInput,
    RankWithAhpCommand, RankWithFuzzyAhpCommand, RankWithFuzzyPrometheeCommand,
    RankWithFuzzyTopsisCommand, RankWithPrometheeCommand, RankWithTopsisCommand,
    ScoredCriterionInput, WeightedCriterionInput,
};
use crate::domain::foundation::ValidationError;
use crate::domain::fuzzy::TriangularFuzzyNumber;

/// Ranking methods as named in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMethod {
    Topsis,
    FuzzyTopsis,
    Promethee,
    FuzzyPromethee,
    Ahp,
    FuzzyAhp,
}

impl RankingMethod {
    /// Parses the URL segment.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "topsis" => Some(Self::Topsis),
            "fuzzy-topsis" => Some(Self::FuzzyTopsis),
            "promethee" => Some(Self::Promethee),
            "fuzzy-promethee" => Some(Self::FuzzyPromethee),
            "ahp" => Some(Self::Ahp),
            "fuzzy-ahp" => Some(Self::FuzzyAhp),
            _ => None,
        }
    }
}

const OPTIONS: [&str; 3] = ["Laptop A", "Laptop B", "Laptop C"];

/// Price, Performance and Battery rows: (name, is_negative, score per laptop).
const CRISP_CRITERIA: [(&str, bool, [Decimal; 3]); 3] = [
    ("Price", true, [dec!(999), dec!(1299), dec!(799)]),
    ("Performance", false, [dec!(85), dec!(95), dec!(70)]),
    ("Battery", false, [dec!(8), dec!(6), dec!(10)]),
];
const CRISP_WEIGHTS: [Decimal; 3] = [dec!(0.40), dec!(0.35), dec!(0.25)];

const FUZZY_CRITERIA: [(&str, bool); 3] = [("Price", true), ("Quality", false), ("Design", false)];

/// Per decision maker: weight per criterion, then score per (laptop, criterion).
const FUZZY_JUDGMENTS: [([[i64; 3]; 3], [[[i64; 3]; 3]; 3]); 2] = [
    (
        [[7, 8, 9], [5, 6, 7], [3, 4, 5]],
        [
            [[5, 6, 7], [7, 8, 9], [5, 6, 7]],
            [[3, 4, 5], [8, 9, 10], [6, 7, 8]],
            [[7, 8, 9], [4, 5, 6], [7, 8, 9]],
        ],
    ),
    (
        [[5, 6, 7], [7, 8, 9], [3, 4, 5]],
        [
            [[4, 5, 6], [6, 7, 8], [6, 7, 8]],
            [[2, 3, 4], [7, 8, 9], [5, 6, 7]],
            [[6, 7, 8], [5, 6, 7], [8, 9, 10]],
        ],
    ),
];

const COMPARISON_PAIRS: [(&str, &str); 3] = [
    ("Price", "Performance"),
    ("Price", "Battery"),
    ("Performance", "Battery"),
];
const CRISP_COMPARISONS: [Decimal; 3] = [dec!(3), dec!(5), dec!(3)];
const FUZZY_COMPARISONS: [[[i64; 3]; 3]; 2] = [
    [[1, 2, 3], [3, 4, 5], [1, 2, 3]],
    [[2, 3, 4], [4, 5, 6], [1, 2, 3]],
];

fn options() -> Vec<String> {
    OPTIONS.iter().map(|o| o.to_string()).collect()
}

fn by_option<T>(values: impl IntoIterator<Item = T>) -> BTreeMap<String, Option<T>> {
    OPTIONS
        .iter()
        .zip(values)
        .map(|(option, value)| (option.to_string(), Some(value)))
        .collect()
}

fn tfn([a, b, c]: [i64; 3]) -> Result<TriangularFuzzyNumber, ValidationError> {
    TriangularFuzzyNumber::new(Decimal::from(a), Decimal::from(b), Decimal::from(c))
}

fn weighted_criteria() -> Vec<WeightedCriterionInput> {
    CRISP_CRITERIA
        .iter()
        .zip(CRISP_WEIGHTS)
        .map(|((name, is_negative, scores), weight)| WeightedCriterionInput {
            name: name.to_string(),
            is_negative: *is_negative,
            weight: Some(weight),
            scores: by_option(*scores),
        })
        .collect()
}

fn scored_criteria() -> Vec<ScoredCriterionInput> {
    CRISP_CRITERIA
        .iter()
        .map(|(name, is_negative, scores)| ScoredCriterionInput {
            name: name.to_string(),
            is_negative: *is_negative,
            scores: by_option(*scores),
        })
        .collect()
}

fn fuzzy_criteria() -> Vec<CriterionInput> {
    FUZZY_CRITERIA
        .iter()
        .map(|(name, is_negative)| CriterionInput {
            name: name.to_string(),
            is_negative: *is_negative,
        })
        .collect()
}

fn fuzzy_judgments() -> Result<Vec<FuzzyJudgmentInput>, ValidationError> {
    let mut judgments = Vec::with_capacity(FUZZY_JUDGMENTS.len());
    for (weights, scores) in &FUZZY_JUDGMENTS {
        let mut judgment = FuzzyJudgmentInput::default();
        for ((criterion, _), weight) in FUZZY_CRITERIA.iter().zip(weights) {
            judgment
                .weights
                .insert(criterion.to_string(), Some(tfn(*weight)?));
        }
        for (option, row) in OPTIONS.iter().zip(scores) {
            let by_criterion = judgment.scores.entry(option.to_string()).or_default();
            for ((criterion, _), score) in FUZZY_CRITERIA.iter().zip(row) {
                by_criterion.insert(criterion.to_string(), Some(tfn(*score)?));
            }
        }
        judgments.push(judgment);
    }
    Ok(judgments)
}

fn comparisons<T>(values: impl IntoIterator<Item = T>) -> Vec<ComparisonInput<T>> {
    COMPARISON_PAIRS
        .iter()
        .zip(values)
        .map(|((a, b), value)| ComparisonInput {
            criterion_a: a.to_string(),
            criterion_b: b.to_string(),
            value: Some(value),
        })
        .collect()
}

pub fn topsis() -> RankWithTopsisCommand {
    RankWithTopsisCommand {
        options: options(),
        criteria: weighted_criteria(),
    }
}

pub fn promethee() -> RankWithPrometheeCommand {
    RankWithPrometheeCommand {
        options: options(),
        criteria: weighted_criteria(),
        preference_functions: Vec::new(),
    }
}

pub fn fuzzy_topsis() -> Result<RankWithFuzzyTopsisCommand, ValidationError> {
    Ok(RankWithFuzzyTopsisCommand {
        options: options(),
        criteria: fuzzy_criteria(),
        decision_makers: fuzzy_judgments()?,
    })
}

pub fn fuzzy_promethee() -> Result<RankWithFuzzyPrometheeCommand, ValidationError> {
    Ok(RankWithFuzzyPrometheeCommand {
        options: options(),
        criteria: fuzzy_criteria(),
        decision_makers: fuzzy_judgments()?,
        preference_functions: Vec::new(),
    })
}

pub fn ahp() -> RankWithAhpCommand {
    RankWithAhpCommand {
        options: options(),
        criteria: scored_criteria(),
        comparisons: comparisons(CRISP_COMPARISONS),
    }
}

pub fn fuzzy_ahp() -> Result<RankWithFuzzyAhpCommand, ValidationError> {
    let mut decision_makers = Vec::with_capacity(FUZZY_COMPARISONS.len());
    for values in &FUZZY_COMPARISONS {
        let values = values
            .iter()
            .map(|value| tfn(*value))
            .collect::<Result<Vec<_>, ValidationError>>()?;
        decision_makers.push(FuzzyComparisonsInput {
            comparisons: comparisons(values),
        });
    }

    Ok(RankWithFuzzyAhpCommand {
        options: options(),
        criteria: scored_criteria(),
        decision_makers,
    })
}

/// Example request body for `method` as JSON.
pub fn example_request(method: RankingMethod) -> Result<serde_json::Value, ExampleError> {
    let body = match method {
        RankingMethod::Topsis => serde_json::to_value(topsis())?,
        RankingMethod::FuzzyTopsis => serde_json::to_value(fuzzy_topsis()?)?,
        RankingMethod::Promethee => serde_json::to_value(promethee())?,
        RankingMethod::FuzzyPromethee => serde_json::to_value(fuzzy_promethee()?)?,
        RankingMethod::Ahp => serde_json::to_value(ahp())?,
        RankingMethod::FuzzyAhp => serde_json::to_value(fuzzy_ahp()?)?,
    };
    Ok(body)
}

/// Failure to build an example body.
#[derive(Debug, thiserror::Error)]
pub enum ExampleError {
    #[error("Invalid example data: {0}")]
    InvalidData(#[from] ValidationError),

    #[error("Example serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
