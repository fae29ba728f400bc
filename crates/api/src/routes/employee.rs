//! Route definitions for onboarding records.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{documents, employee};
use crate::state::AppState;

/// Single-record routes, merged into `/api`.
///
/// ```text
/// POST   /employee/submit                 submit
/// GET    /employee/{id}                   get_by_id
/// PUT    /employee/{id}/approve           approve
/// PUT    /employee/{id}/reject            reject
/// POST   /employee/{id}/upload            upload_document
/// POST   /employee/{id}/offer-letter      upload_offer_letter
/// ```
pub fn employee_router() -> Router<AppState> {
    Router::new()
        .route("/employee/submit", post(employee::submit))
        .route("/employee/{id}", get(employee::get_by_id))
        .route("/employee/{id}/approve", put(employee::approve))
        .route("/employee/{id}/reject", put(employee::reject))
        .route("/employee/{id}/upload", post(documents::upload_document))
        .route(
            "/employee/{id}/offer-letter",
            post(documents::upload_offer_letter),
        )
}

/// Collection routes, merged into `/api`.
///
/// ```text
/// GET    /employees                       list
/// DELETE /employees                       delete_many
/// DELETE /employees/clear                 clear_all
/// ```
pub fn employees_router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(employee::list).delete(employee::delete_many))
        .route("/employees/clear", delete(employee::clear_all))
}
