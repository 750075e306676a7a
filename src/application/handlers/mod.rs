//! Application handlers.
//!
//! Command handlers that validate caller input and drive the domain engines.

pub mod ranking;

pub use ranking::{
    // Results
    AhpRankingResult,
    // Commands
    RankWithAhpCommand, RankWithFuzzyAhpCommand, RankWithFuzzyPrometheeCommand,
    RankWithFuzzyTopsisCommand, RankWithPrometheeCommand, RankWithTopsisCommand,
    // Handlers
    RankWithAhpHandler, RankWithFuzzyAhpHandler, RankWithFuzzyPrometheeHandler,
    RankWithFuzzyTopsisHandler, RankWithPrometheeHandler, RankWithTopsisHandler,
};
