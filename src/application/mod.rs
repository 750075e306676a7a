//! Application layer - Commands and Handlers.
//!
//! This layer validates caller input and orchestrates the domain engines.
//! Every handler is synchronous: the engines are pure and bounded.

pub mod handlers;

pub use handlers::{
    AhpRankingResult, RankWithAhpCommand, RankWithAhpHandler, RankWithFuzzyAhpCommand,
    RankWithFuzzyAhpHandler, RankWithFuzzyPrometheeCommand, RankWithFuzzyPrometheeHandler,
    RankWithFuzzyTopsisCommand, RankWithFuzzyTopsisHandler, RankWithPrometheeCommand,
    RankWithPrometheeHandler, RankWithTopsisCommand, RankWithTopsisHandler,
};
