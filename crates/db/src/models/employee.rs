//! Onboarding record models.

use onboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub referral_id: String,
    pub role: String,
    pub position: String,
    pub location: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub address: String,
    pub status: String,
    pub submission_date: Timestamp,
    pub approval_date: Option<Timestamp>,
    pub rejection_date: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An employee joined with its previous employment and offer letter.
///
/// The joined columns are all nullable because both joins are `LEFT JOIN`s.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeWithRelations {
    pub id: DbId,
    pub referral_id: String,
    pub role: String,
    pub position: String,
    pub location: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub address: String,
    pub status: String,
    pub submission_date: Timestamp,
    pub approval_date: Option<Timestamp>,
    pub rejection_date: Option<Timestamp>,
    pub rejection_reason: Option<String>,

    pub company: Option<String>,
    pub prev_role: Option<String>,
    pub prev_experience: Option<String>,
    pub relieving_letter_name: Option<String>,
    pub relieving_letter_type: Option<String>,
    pub relieving_letter_data: Option<String>,
    pub relieving_letter_upload_date: Option<Timestamp>,

    pub offer_letter_name: Option<String>,
    pub offer_letter_type: Option<String>,
    pub offer_letter_data: Option<String>,
    pub offer_letter_upload_date: Option<Timestamp>,
}

/// Result of a candidate offer-letter lookup: the matched employee's status
/// and, if one is on file, its offer letter.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateOfferLetter {
    pub id: DbId,
    pub status: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_data: Option<String>,
    pub upload_date: Option<Timestamp>,
}
