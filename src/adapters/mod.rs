//! Adapters - Connections between the outside world and the application.
//!
//! - `http` - axum JSON API over the ranking handlers

pub mod http;

pub use http::build_router;
