//! Analysis Module - Pure ranking pipelines for multi-criteria decisions.
//!
//! Every engine is a stateless unit struct whose associated functions are the
//! pipeline stages. Each stage consumes a row table and produces a new one;
//! `calculate` chains them.
//!
//! # Components
//!
//! - `TopsisCalculator` - Closeness to the ideal solution
//! - `FuzzyTopsisCalculator` - TOPSIS over combined fuzzy judgments
//! - `PrometheeCalculator` - PROMETHEE II net outranking flows
//! - `FuzzyPrometheeCalculator` - PROMETHEE II over defuzzified fuzzy judgments
//! - `AhpCalculator` - Weights from pairwise comparisons plus consistency check
//! - `FuzzyAhpCalculator` - Buckley's fuzzy geometric mean AHP
//!
//! # Design Philosophy
//!
//! No I/O and no logging. Arithmetic is exact decimal and checked, so
//! degenerate input fails with a `DomainError` instead of panicking.

mod ahp;
mod fuzzy_ahp;
mod fuzzy_promethee;
mod fuzzy_topsis;
mod promethee;
mod ranking;
mod table;
mod topsis;

pub use ahp::{
    random_index, AhpCalculator, AhpOutcome, AhpWeightedScore, ComparisonMatrix, CriterionWeight,
    PairwiseComparison, DEFAULT_CONSISTENCY_THRESHOLD, RANDOM_INDEX,
};
pub use fuzzy_ahp::{FuzzyAhpCalculator, FuzzyComparisonMatrix};
pub use fuzzy_promethee::FuzzyPrometheeCalculator;
pub use fuzzy_topsis::{
    FuzzyDecisionRow, FuzzyTopsisCalculator, FuzzyTopsisOutcome, FuzzyWeightedScore,
};
pub use promethee::{
    Deviation, OutrankingFlow, PairwisePreference, PreferenceDegree, PreferenceFunction,
    PreferenceFunctions, PrometheeCalculator, PrometheeOutcome,
};
pub use ranking::{rank_descending, RankedOption};
pub use table::{DecisionRow, ScoreRow};
pub use topsis::{IdealSolution, SeparationMeasure, TopsisCalculator, TopsisOutcome, WeightedScore};
