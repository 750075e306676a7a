//! HTTP handlers for ranking endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::ranking::{
    AhpRankingResult, RankWithAhpCommand, RankWithAhpHandler, RankWithFuzzyAhpCommand,
    RankWithFuzzyAhpHandler, RankWithFuzzyPrometheeCommand, RankWithFuzzyPrometheeHandler,
    RankWithFuzzyTopsisCommand, RankWithFuzzyTopsisHandler, RankWithPrometheeCommand,
    RankWithPrometheeHandler, RankWithTopsisCommand, RankWithTopsisHandler,
};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{FuzzyTopsisOutcome, PrometheeOutcome, TopsisOutcome};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{ErrorResponse, HealthResponse};
use super::examples::{example_request, RankingMethod};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Ranking API error that implements IntoResponse.
#[derive(Debug)]
pub enum RankingApiError {
    Domain(DomainError),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl RankingApiError {
    fn status(code: ErrorCode) -> StatusCode {
        if code.is_input_error() {
            StatusCode::BAD_REQUEST
        } else if code.is_numeric_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for RankingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            RankingApiError::Domain(err) => (Self::status(err.code), ErrorResponse::from(&err)),
            RankingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            RankingApiError::NotFound(slug) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found("Ranking method", &slug),
            ),
            RankingApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<DomainError> for RankingApiError {
    fn from(error: DomainError) -> Self {
        RankingApiError::Domain(error)
    }
}

impl From<JsonRejection> for RankingApiError {
    fn from(rejection: JsonRejection) -> Self {
        RankingApiError::BadRequest(rejection.body_text())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing ranking dependencies.
#[derive(Debug, Clone, Default)]
pub struct RankingAppState {
    pub config: AnalysisConfig,
}

impl RankingAppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn topsis_handler(&self) -> RankWithTopsisHandler {
        RankWithTopsisHandler::new(self.config.clone())
    }

    pub fn fuzzy_topsis_handler(&self) -> RankWithFuzzyTopsisHandler {
        RankWithFuzzyTopsisHandler::new(self.config.clone())
    }

    pub fn promethee_handler(&self) -> RankWithPrometheeHandler {
        RankWithPrometheeHandler::new(self.config.clone())
    }

    pub fn fuzzy_promethee_handler(&self) -> RankWithFuzzyPrometheeHandler {
        RankWithFuzzyPrometheeHandler::new(self.config.clone())
    }

    pub fn ahp_handler(&self) -> RankWithAhpHandler {
        RankWithAhpHandler::new(self.config.clone())
    }

    pub fn fuzzy_ahp_handler(&self) -> RankWithFuzzyAhpHandler {
        RankWithFuzzyAhpHandler::new(self.config.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/rankings/topsis
pub async fn rank_with_topsis(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithTopsisCommand>, JsonRejection>,
) -> Result<Json<TopsisOutcome>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.topsis_handler().handle(cmd)?;
    Ok(Json(result))
}

/// POST /api/rankings/fuzzy-topsis
pub async fn rank_with_fuzzy_topsis(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithFuzzyTopsisCommand>, JsonRejection>,
) -> Result<Json<FuzzyTopsisOutcome>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.fuzzy_topsis_handler().handle(cmd)?;
    Ok(Json(result))
}

/// POST /api/rankings/promethee
pub async fn rank_with_promethee(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithPrometheeCommand>, JsonRejection>,
) -> Result<Json<PrometheeOutcome>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.promethee_handler().handle(cmd)?;
    Ok(Json(result))
}

/// POST /api/rankings/fuzzy-promethee
pub async fn rank_with_fuzzy_promethee(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithFuzzyPrometheeCommand>, JsonRejection>,
) -> Result<Json<PrometheeOutcome>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.fuzzy_promethee_handler().handle(cmd)?;
    Ok(Json(result))
}

/// POST /api/rankings/ahp
pub async fn rank_with_ahp(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithAhpCommand>, JsonRejection>,
) -> Result<Json<AhpRankingResult>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.ahp_handler().handle(cmd)?;
    Ok(Json(result))
}

/// POST /api/rankings/fuzzy-ahp
pub async fn rank_with_fuzzy_ahp(
    State(state): State<RankingAppState>,
    body: Result<Json<RankWithFuzzyAhpCommand>, JsonRejection>,
) -> Result<Json<AhpRankingResult>, RankingApiError> {
    let Json(cmd) = body?;
    let result = state.fuzzy_ahp_handler().handle(cmd)?;
    Ok(Json(result))
}

/// GET /api/methods/:method/example
///
/// Returns the laptop example as a request body for the method's POST route.
pub async fn get_method_example(
    Path(method): Path<String>,
) -> Result<Json<serde_json::Value>, RankingApiError> {
    let method =
        RankingMethod::from_slug(&method).ok_or_else(|| RankingApiError::NotFound(method.clone()))?;
    let body = example_request(method).map_err(|err| RankingApiError::Internal(err.to_string()))?;
    Ok(Json(body))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
