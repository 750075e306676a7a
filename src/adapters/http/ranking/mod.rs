//! Ranking HTTP adapter module.
//!
//! Provides REST API endpoints for the six ranking methods and their
//! example requests.

pub mod dto;
pub mod examples;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use examples::RankingMethod;
pub use handlers::{RankingApiError, RankingAppState};
pub use routes::ranking_routes;
