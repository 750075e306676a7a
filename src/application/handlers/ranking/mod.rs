//! Ranking command handlers.
//!
//! One handler per method. Each validates the caller's wide tables, melts
//! them into row tables, runs the engine and logs the outcome.

pub mod input;
mod rank_with_ahp;
mod rank_with_fuzzy_ahp;
mod rank_with_fuzzy_promethee;
mod rank_with_fuzzy_topsis;
mod rank_with_promethee;
mod rank_with_topsis;

pub use input::{
    ComparisonInput, CriterionInput, FuzzyComparisonsInput, FuzzyJudgmentInput,
    PreferenceFunctionInput, PreferenceFunctionKind, ScoredCriterionInput, WeightedCriterionInput,
};
pub use rank_with_ahp::{AhpRankingResult, RankWithAhpCommand, RankWithAhpHandler, RankWithAhpResult};
pub use rank_with_fuzzy_ahp::{
    RankWithFuzzyAhpCommand, RankWithFuzzyAhpHandler, RankWithFuzzyAhpResult,
};
pub use rank_with_fuzzy_promethee::{
    RankWithFuzzyPrometheeCommand, RankWithFuzzyPrometheeHandler, RankWithFuzzyPrometheeResult,
};
pub use rank_with_fuzzy_topsis::{
    RankWithFuzzyTopsisCommand, RankWithFuzzyTopsisHandler, RankWithFuzzyTopsisResult,
};
pub use rank_with_promethee::{
    RankWithPrometheeCommand, RankWithPrometheeHandler, RankWithPrometheeResult,
};
pub use rank_with_topsis::{RankWithTopsisCommand, RankWithTopsisHandler, RankWithTopsisResult};
