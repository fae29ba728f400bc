use onboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `previous_employment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PreviousEmployment {
    pub id: DbId,
    pub employee_id: DbId,
    pub company: String,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub relieving_letter_name: Option<String>,
    pub relieving_letter_type: String,
    pub relieving_letter_data: String,
    pub relieving_letter_upload_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
