//! Repository for the `previous_employment` table.

use onboard_core::onboarding::NewPreviousEmployment;
use onboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::previous_employment::PreviousEmployment;

/// Column list for the `previous_employment` table.
const COLUMNS: &str = "id, employee_id, company, role, experience, relieving_letter_name, \
    relieving_letter_type, relieving_letter_data, relieving_letter_upload_date, \
    created_at, updated_at";

/// Provides data access for prior employment records.
pub struct PreviousEmploymentRepo;

impl PreviousEmploymentRepo {
    /// Insert or replace the prior employment of an employee.
    pub async fn upsert<'e, E>(
        executor: E,
        employee_id: DbId,
        input: &NewPreviousEmployment,
    ) -> Result<PreviousEmployment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO previous_employment \
                (employee_id, company, role, experience, relieving_letter_name, \
                 relieving_letter_type, relieving_letter_data, relieving_letter_upload_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (employee_id) \
             DO UPDATE SET \
                company = EXCLUDED.company, \
                role = EXCLUDED.role, \
                experience = EXCLUDED.experience, \
                relieving_letter_name = EXCLUDED.relieving_letter_name, \
                relieving_letter_type = EXCLUDED.relieving_letter_type, \
                relieving_letter_data = EXCLUDED.relieving_letter_data, \
                relieving_letter_upload_date = EXCLUDED.relieving_letter_upload_date \
             RETURNING {COLUMNS}"
        );
        let letter = &input.relieving_letter;
        sqlx::query_as::<_, PreviousEmployment>(&query)
            .bind(employee_id)
            .bind(&input.company)
            .bind(&input.role)
            .bind(&input.experience)
            .bind(&letter.file_name)
            .bind(&letter.mime_type)
            .bind(&letter.data_url)
            .bind(letter.upload_date)
            .fetch_one(executor)
            .await
    }

    pub async fn find_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Option<PreviousEmployment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM previous_employment WHERE employee_id = $1");
        sqlx::query_as::<_, PreviousEmployment>(&query)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }
}
