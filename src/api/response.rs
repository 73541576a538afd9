//! Response types for the payroll API.
//!
//! This module defines the success and error response structures and maps
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{EmployeePayroll, HoursRow, PayRow, PayrollReport, RosterWarning};

/// Successful response body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// The hours table, one row per employee.
    pub hours: Vec<HoursRow>,
    /// The pay table, one row per employee.
    pub pay: Vec<PayRow>,
    /// Full per-employee results including the audit trail.
    pub employees: Vec<EmployeePayroll>,
    /// Rate entries with no punches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RosterWarning>,
}

impl PayrollResponse {
    /// Builds the response from a finished report and the roster warnings.
    pub fn new(report: PayrollReport, warnings: Vec<RosterWarning>) -> Self {
        Self {
            hours: report.hours_table(),
            pay: report.pay_table(),
            employees: report.employees,
            warnings,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidPunch { punch, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PUNCH",
                    format!("Invalid punch '{}': {}", punch, message),
                    "Every punch must end after it starts",
                ),
            },
            EngineError::MissingRate { employee } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_RATE",
                    format!("No pay rate found for employee: {}", employee),
                    "Every employee with punches needs a rate entry",
                ),
            },
            EngineError::AssertionViolation { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "ASSERTION_VIOLATION",
                    "Payroll calculation failed an internal check",
                    message,
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::TableRead { path, message } | EngineError::TableWrite { path, message } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "TABLE_ERROR",
                        "Table input/output failed",
                        format!("{}: {}", path, message),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_missing_rate_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::MissingRate {
            employee: "JANE DOE".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "MISSING_RATE");
        assert!(api_error.error.message.contains("JANE DOE"));
    }

    #[test]
    fn test_invalid_punch_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidPunch {
            punch: "JANE DOE 2023-04-04 09:00:00 - 2023-04-04 09:00:00".to_string(),
            message: "end time is not after start time".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PUNCH");
    }

    #[test]
    fn test_assertion_violation_is_server_error() {
        let api_error: ApiErrorResponse = EngineError::AssertionViolation {
            message: "regular hours above threshold".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "ASSERTION_VIOLATION");
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("regular hours above threshold")
        );
    }

    #[test]
    fn test_empty_warnings_are_omitted() {
        let response = PayrollResponse::new(PayrollReport::default(), Vec::new());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("warnings"));
        assert!(json.contains("\"hours\":[]"));
    }
}
