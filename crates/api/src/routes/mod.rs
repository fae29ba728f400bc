pub mod candidate;
pub mod employee;
pub mod health;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use serde_json::json;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /employee/submit                       submit (POST)
/// /employee/{id}                         get
/// /employee/{id}/approve                 approve (PUT)
/// /employee/{id}/reject                  reject (PUT)
/// /employee/{id}/upload                  upload document (POST, multipart)
/// /employee/{id}/offer-letter            upload offer letter (POST, multipart)
///
/// /employees                             list, delete many (DELETE)
/// /employees/clear                       delete all (DELETE)
///
/// /candidate/offer-letter                candidate offer letter lookup (POST)
/// ```
///
/// Any other path under `/api` answers 404 with a JSON body.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(employee::employee_router())
        .merge(employee::employees_router())
        .merge(candidate::router())
        .fallback(endpoint_not_found)
}

/// Fallback for unknown API paths.
async fn endpoint_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found", "code": "NOT_FOUND" })),
    )
}
