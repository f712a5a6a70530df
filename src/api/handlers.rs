//! HTTP request handlers for the Compensation Engine API.
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
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{apply_revision, calculate_breakdown, validate_amounts, validate_for_save};
use crate::config::AnnualisationMode;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, CalculationResult, CompensationInput, EmployeeRecord, RevisionResult,
    RevisionSummary, SalaryRevisionRequest,
};

use super::request::{BreakdownQuery, EmployeeRecordRequest, RevisionCalculationRequest};
use super::response::ApiErrorResponse;
use super::state::AppState;

const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/compensation/breakdown", post(breakdown_handler))
        .route("/compensation/revision", post(revision_handler))
        .route("/employees", get(list_employees_handler))
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(put_employee_handler)
                .delete(delete_employee_handler),
        )
        .route("/employees/:id/breakdown", get(employee_breakdown_handler))
        .route("/employees/:id/revision", post(employee_revision_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> Response {
    let api_error: ApiErrorResponse = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = api_error.status.as_u16(),
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request failed"
    );
    api_error.into_response()
}

/// Handler for POST /compensation/breakdown.
///
/// Computes the breakdown of the posted compensation input.
async fn breakdown_handler(
    State(state): State<AppState>,
    query: Result<Query<BreakdownQuery>, QueryRejection>,
    payload: Result<Json<CompensationInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return error_response(correlation_id, rejection),
    };
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return error_response(correlation_id, rejection),
    };
    if let Err(err) = validate_amounts(&input) {
        return error_response(correlation_id, err);
    }

    let mode = query
        .annualisation
        .unwrap_or_else(|| state.config().annualisation());
    let result = breakdown_result(input, mode, None);

    info!(
        correlation_id = %correlation_id,
        annualisation = mode.as_str(),
        total_annual_ctc = %result.breakdown.total_annual_ctc,
        duration_us = result.audit_trace.duration_us,
        "Breakdown completed"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /compensation/revision.
///
/// Applies a revision to the posted compensation without touching the store.
async fn revision_handler(
    State(state): State<AppState>,
    payload: Result<Json<RevisionCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing revision request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(correlation_id, rejection),
    };

    match revision_result(&state, &request.current, request.revision, None) {
        Ok((result, _)) => {
            info!(
                correlation_id = %correlation_id,
                fixed_allowance = %result.revised.fixed_allowance,
                warnings = result.audit_trace.warnings.len(),
                "Revision completed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().list() {
        Ok(records) => {
            info!(correlation_id = %correlation_id, count = records.len(), "Listed employees");
            json_response(StatusCode::OK, records)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/{id}.
async fn get_employee_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Loading employee");

    match load_record(&state, &id) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /employees/{id}.
///
/// Creates or replaces a record. The annual CTC must be positive.
async fn put_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Saving employee");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(correlation_id, rejection),
    };

    match save_record(&state, &id, request) {
        Ok((record, created)) => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                created,
                "Employee saved"
            );
            json_response(status, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /employees/{id}.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Deleting employee");

    match state.repository().delete(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(
            correlation_id,
            EngineError::EmployeeNotFound { employee_id: id },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/{id}/breakdown.
async fn employee_breakdown_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<BreakdownQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing employee breakdown");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return error_response(correlation_id, rejection),
    };

    match load_record(&state, &id) {
        Ok(record) => {
            let mode = query
                .annualisation
                .unwrap_or_else(|| state.config().annualisation());
            let result = breakdown_result(record.compensation, mode, Some(record.id));
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees/{id}/revision.
///
/// Applies the revision to the stored record and persists the result.
async fn employee_revision_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SalaryRevisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing employee revision");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(correlation_id, rejection),
    };

    match revise_record(&state, &id, request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                previous_annual_ctc = %result.previous_annual_ctc,
                new_annual_ctc = %result.revised.annual_ctc,
                "Employee revision saved"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn breakdown_result(
    input: CompensationInput,
    mode: AnnualisationMode,
    employee_id: Option<String>,
) -> CalculationResult {
    let start_time = Instant::now();
    let calculation = calculate_breakdown(&input, mode, 1);

    CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee_id,
        annualisation: mode,
        input,
        breakdown: calculation.breakdown,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}

fn revision_result(
    state: &AppState,
    current: &CompensationInput,
    request: SalaryRevisionRequest,
    employee_id: Option<String>,
) -> EngineResult<(RevisionResult, RevisionSummary)> {
    let start_time = Instant::now();
    let revision = request.validate()?;
    let config = state.config();
    let calculation = apply_revision(
        &revision,
        config.negative_remainder(),
        config.annualisation(),
    )?;

    let summary = RevisionSummary {
        effective_date: revision.effective_date,
        previous_annual_ctc: current.annual_ctc,
        new_annual_ctc: revision.new_annual_ctc,
        reason: revision.reason,
    };

    let result = RevisionResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee_id,
        previous_annual_ctc: current.annual_ctc,
        revised: calculation.revised,
        breakdown: calculation.breakdown,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    };

    Ok((result, summary))
}

fn load_record(state: &AppState, id: &str) -> EngineResult<EmployeeRecord> {
    state
        .repository()
        .load(id)?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: id.to_string(),
        })
}

fn save_record(
    state: &AppState,
    id: &str,
    request: EmployeeRecordRequest,
) -> EngineResult<(EmployeeRecord, bool)> {
    let config = state.config().config();
    let mut created = false;

    let record = state.repository().update(
        id,
        Box::new(|existing: Option<EmployeeRecord>| {
            created = existing.is_none();
            let record = request.into_record(id, config, existing);
            validate_for_save(&record.compensation)?;
            Ok(record)
        }),
    )?;

    Ok((record, created))
}

fn revise_record(
    state: &AppState,
    id: &str,
    request: SalaryRevisionRequest,
) -> EngineResult<RevisionResult> {
    let mut outcome = None;

    state.repository().update(
        id,
        Box::new(|existing: Option<EmployeeRecord>| {
            let mut record = existing.ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: id.to_string(),
            })?;
            let (result, summary) =
                revision_result(state, &record.compensation, request, Some(id.to_string()))?;

            record.compensation = result.revised.clone();
            record.last_revision = Some(summary);
            outcome = Some(result);
            Ok(record)
        }),
    )?;

    outcome.ok_or_else(|| EngineError::StorageError {
        message: format!("revision of {} was not applied", id),
    })
}
