//! Candidate-facing offer letter retrieval.

use axum::extract::State;
use axum::Json;
use onboard_core::error::CoreError;
use onboard_core::onboarding::{ensure_candidate_approved, validate_candidate_lookup, EmployeeStatus};
use onboard_db::projection::{self, DocumentView};
use onboard_db::repositories::EmployeeRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body identifying a candidate by exact email, name and referral ID.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOfferLetterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub referral_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOfferLetterResponse {
    pub offer_letter: DocumentView,
}

/// POST /api/candidate/offer-letter
///
/// Returns the offer letter of the matching employee. The employee must be
/// approved and an offer letter must be on file.
pub async fn get_offer_letter(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CandidateOfferLetterRequest>,
) -> AppResult<Json<CandidateOfferLetterResponse>> {
    let lookup = validate_candidate_lookup(
        input.email.as_deref(),
        input.name.as_deref(),
        input.referral_id.as_deref(),
    )?;

    let row = EmployeeRepo::find_candidate_offer_letter(&state.pool, &lookup)
        .await?
        .ok_or_else(|| CoreError::NoMatch("No matching employee found".to_string()))?;

    let status = EmployeeStatus::from_str(&row.status)
        .map_err(|e| CoreError::Internal(format!("Unreadable stored status: {e}")))?;
    ensure_candidate_approved(status)?;

    let employee_id = row.id;
    let offer_letter = projection::candidate_offer_letter(row)
        .ok_or_else(|| CoreError::NoMatch("Offer letter not found".to_string()))?;

    tracing::info!(employee_id, "Offer letter retrieved by candidate");

    Ok(Json(CandidateOfferLetterResponse { offer_letter }))
}
