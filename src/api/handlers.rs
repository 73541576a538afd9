//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{audit_roster, run_payroll};

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, PayrollResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Handler for POST /payroll endpoint.
///
/// Runs payroll over the submitted punches and rates and returns the hours
/// and pay tables.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let rates = request.rate_table();
    let warnings = audit_roster(&request.punches, &rates);
    let punch_count = request.punches.len();

    let start_time = Instant::now();
    let engine_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_payroll(&request.punches, &rates, engine_state.payroll_config())
    })
    .await;

    match outcome {
        Ok(Ok(report)) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                punches = punch_count,
                employees = report.employees.len(),
                total_pay = %report.total_pay(),
                duration_us = duration.as_micros(),
                "Payroll completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(PayrollResponse::new(report, warnings)),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Payroll task did not complete"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::new(
                    "INTERNAL_ERROR",
                    "Payroll calculation did not complete",
                )),
            )
                .into_response()
        }
    }
}
