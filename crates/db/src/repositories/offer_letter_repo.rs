//! Repository for the `offer_letters` table.

use onboard_core::document::ValidatedDocument;
use onboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::offer_letter::OfferLetter;

/// Column list for the `offer_letters` table.
const COLUMNS: &str =
    "id, employee_id, file_name, file_type, file_data, upload_date, created_at, updated_at";

/// Provides data access for offer letters.
pub struct OfferLetterRepo;

impl OfferLetterRepo {
    /// Insert or replace the single offer letter of an employee.
    ///
    /// Does not check the employee's status; callers gate on approval first.
    pub async fn upsert(
        pool: &PgPool,
        employee_id: DbId,
        doc: &ValidatedDocument,
    ) -> Result<OfferLetter, sqlx::Error> {
        let query = format!(
            "INSERT INTO offer_letters (employee_id, file_name, file_type, file_data, upload_date) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (employee_id) \
             DO UPDATE SET \
                file_name = EXCLUDED.file_name, \
                file_type = EXCLUDED.file_type, \
                file_data = EXCLUDED.file_data, \
                upload_date = EXCLUDED.upload_date \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OfferLetter>(&query)
            .bind(employee_id)
            .bind(&doc.file_name)
            .bind(&doc.mime_type)
            .bind(&doc.data_url)
            .bind(doc.upload_date)
            .fetch_one(pool)
            .await
    }

    /// Find the offer letter of an employee, if one has been issued.
    pub async fn find_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Option<OfferLetter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offer_letters WHERE employee_id = $1");
        sqlx::query_as::<_, OfferLetter>(&query)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }
}
