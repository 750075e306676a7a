//! HTTP routes for ranking endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_method_example, rank_with_ahp, rank_with_fuzzy_ahp, rank_with_fuzzy_promethee,
    rank_with_fuzzy_topsis, rank_with_promethee, rank_with_topsis, RankingAppState,
};

/// Creates the ranking router with all routes.
pub fn ranking_routes(state: RankingAppState) -> Router {
    Router::new()
        // POST /api/rankings/topsis
        .route("/api/rankings/topsis", post(rank_with_topsis))
        // POST /api/rankings/fuzzy-topsis
        .route("/api/rankings/fuzzy-topsis", post(rank_with_fuzzy_topsis))
        // POST /api/rankings/promethee
        .route("/api/rankings/promethee", post(rank_with_promethee))
        // POST /api/rankings/fuzzy-promethee
        .route("/api/rankings/fuzzy-promethee", post(rank_with_fuzzy_promethee))
        // POST /api/rankings/ahp
        .route("/api/rankings/ahp", post(rank_with_ahp))
        // POST /api/rankings/fuzzy-ahp
        .route("/api/rankings/fuzzy-ahp", post(rank_with_fuzzy_ahp))
        // GET /api/methods/:method/example
        .route("/api/methods/:method/example", get(get_method_example))
        .with_state(state)
}
