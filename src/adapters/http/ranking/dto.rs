//! Data Transfer Objects for ranking endpoints.
//!
//! Request and result bodies are the application commands and results
//! themselves; this module only adds the envelope types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        let details = (!error.details.is_empty()).then(|| {
            serde_json::Value::Object(
                error
                    .details
                    .iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
                    .collect(),
            )
        });
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            details,
        }
    }
}

/// Response for the health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn domain_error_without_details_omits_them() {
        let error = DomainError::missing_input("Field 'options' cannot be empty");
        let response = ErrorResponse::from(&error);

        assert_eq!(response.code, "MISSING_INPUT");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn domain_error_details_become_an_object() {
        let error = DomainError::division_by_zero("AHP weighted scores")
            .with_detail("criterion", "Price");
        let response = ErrorResponse::from(&error);

        assert_eq!(response.code, ErrorCode::DivisionByZero.to_string());
        let details = response.details.unwrap();
        assert_eq!(details["context"], "AHP weighted scores");
        assert_eq!(details["criterion"], "Price");
    }

    #[test]
    fn health_response_serializes() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
