//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy and the checked decimal arithmetic that every
//! ranking pipeline is built on.

mod errors;
pub mod numeric;

pub use errors::{DomainError, ErrorCode, ValidationError};
