//! HTTP adapters - REST API implementations.
//!
//! `build_router` assembles the ranking routes, the health probe and the
//! tower-http layers configured from `AppConfig`.

pub mod ranking;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;

pub use ranking::{ranking_routes, RankingAppState};

/// Builds the full application router.
pub fn build_router(config: &AppConfig) -> Router {
    let state = RankingAppState::new(config.analysis.clone());

    ranking_routes(state)
        .route("/health", get(ranking::handlers::health))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Configured origins, or any origin outside production when none are set.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !config.is_production() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
