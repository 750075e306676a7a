//! MCDM Engine - Multi-criteria decision making over exact decimals.
//!
//! Ranks options against weighted criteria with TOPSIS, PROMETHEE II and AHP,
//! plus fuzzy variants that combine several decision makers' triangular fuzzy
//! judgments.
//!
//! # Architecture
//!
//! - `domain` - Fuzzy numbers and the pure ranking engines
//! - `application` - Command handlers: input validation, melting, logging
//! - `adapters` - axum HTTP API
//! - `config` - Environment-driven configuration
//! - `logging` - tracing subscriber setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
