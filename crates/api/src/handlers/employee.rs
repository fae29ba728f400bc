//! Handlers for onboarding records: submission, reads, decisions and
//! deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use onboard_core::error::CoreError;
use onboard_core::onboarding::{
    validate_delete_ids, validate_rejection_reason, validate_submission, Submission,
};
use onboard_core::types::DbId;
use onboard_db::projection::EmployeeView;
use onboard_db::repositories::EmployeeRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Response body for a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub referral_id: String,
    pub id: DbId,
}

/// Request body for the reject endpoint.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// Request body for the bulk delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteEmployeesRequest {
    #[serde(default)]
    pub ids: Vec<DbId>,
}

fn employee_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Employee",
        id,
    })
}

/// POST /api/employee/submit
///
/// Validates the whole submission before writing, then stores the record,
/// its documents and any prior employment together.
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<Submission>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let validated = validate_submission(&input)?;

    if !validated.skipped_documents.is_empty() {
        tracing::warn!(
            referral_id = %validated.employee.referral_id,
            skipped = ?validated.skipped_documents,
            "Dropping supplementary documents with invalid payloads"
        );
    }

    let employee = EmployeeRepo::create_submission(&state.pool, &validated).await?;

    tracing::info!(
        employee_id = employee.id,
        referral_id = %employee.referral_id,
        documents = validated.documents.len(),
        "Employee submission created"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Employee data submitted successfully".to_string(),
            referral_id: employee.referral_id,
            id: employee.id,
        }),
    ))
}

/// GET /api/employees
///
/// Every record, hydrated with documents, prior employment and offer letter.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EmployeeView>>> {
    let employees = EmployeeRepo::list_views(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/employee/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EmployeeView>> {
    let employee = EmployeeRepo::find_view(&state.pool, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    Ok(Json(employee))
}

/// PUT /api/employee/{id}/approve
///
/// Applies from any status, including `rejected` and `approved`.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let employee = EmployeeRepo::approve(&state.pool, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    tracing::info!(employee_id = id, approval_date = ?employee.approval_date, "Employee approved");

    Ok(Json(MessageResponse::new("Employee approved successfully")))
}

/// PUT /api/employee/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<RejectRequest>,
) -> AppResult<Json<MessageResponse>> {
    let reason = validate_rejection_reason(input.reason.as_deref())?;

    EmployeeRepo::reject(&state.pool, id, &reason)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    tracing::info!(employee_id = id, reason = %reason, "Employee rejected");

    Ok(Json(MessageResponse::new("Employee rejected successfully")))
}

/// DELETE /api/employees
///
/// Succeeds if at least one of the given IDs existed.
pub async fn delete_many(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DeleteEmployeesRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_delete_ids(&input.ids)?;

    let deleted = EmployeeRepo::delete_many(&state.pool, &input.ids).await?;
    if deleted == 0 {
        return Err(AppError::Core(CoreError::NoMatch(
            "No employees found".to_string(),
        )));
    }

    tracing::info!(requested = input.ids.len(), deleted, "Employees deleted");

    Ok(Json(MessageResponse::new("Employees deleted successfully")))
}

/// DELETE /api/employees/clear
pub async fn clear_all(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let deleted = EmployeeRepo::clear_all(&state.pool).await?;

    tracing::warn!(deleted, "All employee data cleared");

    Ok(Json(MessageResponse::new(
        "All employee data cleared successfully",
    )))
}
