//! Document slot model.

use onboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `documents` table. One per `(employee_id, document_type)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub employee_id: DbId,
    pub document_type: String,
    pub file_name: Option<String>,
    pub file_type: String,
    pub file_data: String,
    pub upload_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
