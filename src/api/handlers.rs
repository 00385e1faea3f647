//! HTTP request handlers for the user-invoked payroll operations.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::HrResult;
use crate::ops::{self, OperationOutcome};

use super::request::ActionRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/requisitions/:id/claim", post(create_claim_handler))
        .route("/change-requests/:id/submit", post(submit_change_request_handler))
        .route("/change-requests/:id/approve", post(approve_change_request_handler))
        .route("/change-requests/:id/reject", post(reject_change_request_handler))
        .route("/disbursements/:id/load-payments", post(load_payments_handler))
        .route("/disbursements/:id/approve", post(approve_disbursement_handler))
        .route("/disbursements/:id/mark-paid", post(mark_paid_handler))
        .with_state(state)
}

/// Handler for POST /requisitions/{id}/claim.
async fn create_claim_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, requisition = %id, caller = %request.caller, "Creating overtime claim");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(ops::create_claim_from_requisition(&mut store, &id), correlation_id)
}

/// Handler for POST /change-requests/{id}/submit.
async fn submit_change_request_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, change_request = %id, caller = %request.caller, "Submitting change request");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(
        ops::submit_change_request(&mut store, &id, state.notifier()),
        correlation_id,
    )
}

/// Handler for POST /change-requests/{id}/approve.
async fn approve_change_request_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, change_request = %id, caller = %request.caller, "Approving change request");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(
        ops::approve_change_request(
            &mut store,
            &id,
            &request.caller,
            Utc::now().date_naive(),
            request.notes,
            state.notifier(),
        ),
        correlation_id,
    )
}

/// Handler for POST /change-requests/{id}/reject.
async fn reject_change_request_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, change_request = %id, caller = %request.caller, "Rejecting change request");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(
        ops::reject_change_request(
            &mut store,
            &id,
            &request.caller,
            Utc::now().date_naive(),
            request.notes,
            state.notifier(),
        ),
        correlation_id,
    )
}

/// Handler for POST /disbursements/{id}/load-payments.
async fn load_payments_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, disbursement = %id, caller = %request.caller, "Loading worker payments");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(ops::load_worker_payments(&mut store, &id), correlation_id)
}

/// Handler for POST /disbursements/{id}/approve.
async fn approve_disbursement_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, disbursement = %id, caller = %request.caller, "Approving disbursement");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(ops::approve_disbursement(&mut store, &id), correlation_id)
}

/// Handler for POST /disbursements/{id}/mark-paid.
async fn mark_paid_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_action(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, disbursement = %id, caller = %request.caller, "Marking disbursement paid");

    let mut store = state.store().write().expect("store lock poisoned");
    respond(
        ops::mark_disbursement_paid(
            &mut store,
            state.config(),
            &id,
            &request.caller,
            Utc::now().date_naive(),
        ),
        correlation_id,
    )
}

/// Extracts the action body, mapping JSON rejections to 400 responses.
fn parse_action(
    payload: Result<Json<ActionRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<ActionRequest, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

/// Maps an operation result to a response, logging the outcome.
fn respond(result: HrResult<OperationOutcome>, correlation_id: Uuid) -> Response {
    match result {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                success = outcome.success,
                message = %outcome.message,
                "Operation completed"
            );
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Operation failed");
            let response: ApiErrorResponse = error.into();
            response.into_response()
        }
    }
}
