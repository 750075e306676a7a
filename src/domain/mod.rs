//! Domain layer containing the decision-analysis logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Error taxonomy and checked decimal arithmetic
//! - `fuzzy` - Triangular fuzzy numbers
//! - `analysis` - TOPSIS, PROMETHEE II and AHP, crisp and fuzzy

pub mod analysis;
pub mod foundation;
pub mod fuzzy;
