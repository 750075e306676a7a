//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Missing {field} for '{key}'")]
    MissingValue { field: String, key: String },

    #[error("Field '{field}' contains duplicate value '{value}'")]
    DuplicateValue { field: String, value: String },

    #[error("Field '{field}' references unknown value '{value}'")]
    UnknownReference { field: String, value: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        actual: String,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Invalid triangular fuzzy number ({a}, {b}, {c}): components must satisfy 0 <= a <= b <= c")]
    InvalidFuzzyNumber { a: String, b: String, c: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a missing value error for a keyed cell (score, weight, comparison).
    pub fn missing_value(field: impl Into<String>, key: impl Into<String>) -> Self {
        ValidationError::MissingValue {
            field: field.into(),
            key: key.into(),
        }
    }

    /// Creates a duplicate value error.
    pub fn duplicate_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::DuplicateValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown reference error.
    pub fn unknown_reference(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnknownReference {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(
        field: impl Into<String>,
        min: impl fmt::Display,
        max: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid fuzzy number error from its three components.
    pub fn invalid_fuzzy_number(
        a: impl fmt::Display,
        b: impl fmt::Display,
        c: impl fmt::Display,
    ) -> Self {
        ValidationError::InvalidFuzzyNumber {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
        }
    }

    /// Returns the error code this validation failure is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. }
            | ValidationError::MissingValue { .. }
            | ValidationError::UnknownReference { .. } => ErrorCode::MissingInput,
            ValidationError::InvalidFuzzyNumber { .. } => ErrorCode::InvalidFuzzyNumber,
            ValidationError::DuplicateValue { .. }
            | ValidationError::OutOfRange { .. }
            | ValidationError::InvalidFormat { .. } => ErrorCode::ValidationFailed,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors
    ValidationFailed,
    MissingInput,
    InvalidFuzzyNumber,

    // Numeric errors
    DivisionByZero,
    NumericOverflow,

    InternalError,
}

impl ErrorCode {
    /// Returns true for errors caused by the caller's input rather than by arithmetic.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed | ErrorCode::MissingInput | ErrorCode::InvalidFuzzyNumber
        )
    }

    /// Returns true for errors raised by degenerate arithmetic.
    pub fn is_numeric_error(&self) -> bool {
        matches!(self, ErrorCode::DivisionByZero | ErrorCode::NumericOverflow)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MissingInput => "MISSING_INPUT",
            ErrorCode::InvalidFuzzyNumber => "INVALID_FUZZY_NUMBER",
            ErrorCode::DivisionByZero => "DIVISION_BY_ZERO",
            ErrorCode::NumericOverflow => "NUMERIC_OVERFLOW",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a missing input error.
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingInput, message)
    }

    /// Creates a division by zero error raised in the named computation.
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        let context = context.into();
        Self::new(
            ErrorCode::DivisionByZero,
            format!("Division by zero in {}", context),
        )
        .with_detail("context", context)
    }

    /// Creates a numeric overflow error raised in the named computation.
    pub fn overflow(context: impl Into<String>) -> Self {
        let context = context.into();
        Self::new(
            ErrorCode::NumericOverflow,
            format!("Numeric overflow in {}", context),
        )
        .with_detail("context", context)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        DomainError::new(error.code(), error.to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
