//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Month;
use crate::workflow::GenerationRequest;

use super::request::{MarkPaidRequest, PreviewRequest, RecordsQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/employees/:employee_id/attendance/:year/:month",
            get(attendance_handler),
        )
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/generate", post(generate_handler))
        .route("/payroll/records", get(list_records_handler))
        .route(
            "/payroll/records/:record_id",
            get(get_record_handler).delete(delete_record_handler),
        )
        .route("/payroll/records/:record_id/pay", post(mark_paid_handler))
        .with_state(state)
}

/// Converts an operation result into a JSON response, logging failures.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    success: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => (
            success,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON body rejection to an API error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
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
    ApiErrorResponse::bad_request(error)
}

fn parse_record_id(raw: &str) -> EngineResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| EngineError::InvalidInput {
        field: "recordId".to_string(),
        message: format!("'{}' is not a valid record id", raw),
    })
}

/// Handler for GET /employees/:employee_id/attendance/:year/:month.
async fn attendance_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, i32, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        month = %month,
        "Processing attendance summary request"
    );

    let result = month
        .parse::<Month>()
        .and_then(|m| state.service().attendance_summary(&employee_id, m, year));
    respond(correlation_id, "attendance_summary", StatusCode::OK, result)
}

/// Handler for POST /payroll/preview.
///
/// Computes a salary from the supplied inputs without persisting anything.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    let result = state
        .service()
        .preview(&request.structure, &request.summary, &request.adjustments());
    if let Ok(computation) = &result {
        info!(
            correlation_id = %correlation_id,
            net_salary = %computation.net_salary,
            duration_us = start_time.elapsed().as_micros(),
            "Preview computed"
        );
    }
    respond(correlation_id, "preview", StatusCode::OK, result)
}

/// Handler for POST /payroll/generate.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        month = %request.month,
        year = request.year,
        "Processing salary generation request"
    );

    let result = state.service().generate(&request);
    respond(correlation_id, "generate", StatusCode::CREATED, result)
}

/// Handler for GET /payroll/records.
///
/// Lists one employee's records when `employeeId` is given, otherwise every
/// record for `month` and `year`.
async fn list_records_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    let service = state.service();
    let result = match (query.employee_id, query.month, query.year) {
        (Some(employee_id), _, _) => service.list_employee_records(&employee_id),
        (None, Some(month), Some(year)) => month
            .parse::<Month>()
            .and_then(|m| service.list_records(m, year)),
        _ => Err(EngineError::InvalidInput {
            field: "month".to_string(),
            message: "either employeeId or both month and year are required".to_string(),
        }),
    };
    respond(correlation_id, "list_records", StatusCode::OK, result)
}

/// Handler for GET /payroll/records/:record_id.
async fn get_record_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = parse_record_id(&record_id).and_then(|id| state.service().get_record(id));
    respond(correlation_id, "get_record", StatusCode::OK, result)
}

/// Handler for POST /payroll/records/:record_id/pay.
async fn mark_paid_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<MarkPaidRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        record_id = %record_id,
        "Processing mark paid request"
    );

    let result = parse_record_id(&record_id)
        .and_then(|id| state.service().mark_paid(id, request.payment_date));
    respond(correlation_id, "mark_paid", StatusCode::OK, result)
}

/// Handler for DELETE /payroll/records/:record_id.
async fn delete_record_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        record_id = %record_id,
        "Processing delete draft request"
    );

    match parse_record_id(&record_id).and_then(|id| state.service().delete_draft(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Delete draft failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
