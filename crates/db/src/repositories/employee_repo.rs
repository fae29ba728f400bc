//! Repository for the `employees` table and the hydrated record views.

use onboard_core::onboarding::{
    CandidateLookup, ValidatedSubmission, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use onboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CandidateOfferLetter, Employee, EmployeeWithRelations};
use crate::projection::{self, EmployeeView};
use crate::repositories::{DocumentRepo, PreviousEmploymentRepo};

/// Column list for the `employees` table.
const COLUMNS: &str = "id, referral_id, role, position, location, name, email, phone, \
    guardian_name, guardian_phone, address, status, submission_date, approval_date, \
    rejection_date, rejection_reason, created_at, updated_at";

/// Employee columns joined with previous employment and offer letter.
///
/// Both joins target tables with a unique `employee_id`, so each employee
/// yields at most one row.
const JOINED_SELECT: &str = "SELECT \
        e.id, e.referral_id, e.role, e.position, e.location, e.name, e.email, e.phone, \
        e.guardian_name, e.guardian_phone, e.address, e.status, e.submission_date, \
        e.approval_date, e.rejection_date, e.rejection_reason, \
        pe.company, pe.role AS prev_role, pe.experience AS prev_experience, \
        pe.relieving_letter_name, pe.relieving_letter_type, pe.relieving_letter_data, \
        pe.relieving_letter_upload_date, \
        ol.file_name AS offer_letter_name, ol.file_type AS offer_letter_type, \
        ol.file_data AS offer_letter_data, ol.upload_date AS offer_letter_upload_date \
     FROM employees e \
     LEFT JOIN previous_employment pe ON pe.employee_id = e.id \
     LEFT JOIN offer_letters ol ON ol.employee_id = e.id";

/// Provides data access for onboarding records.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Persist a validated submission: the employee row, every document
    /// slot, and the prior employment if declared.
    ///
    /// All writes share one transaction, so a storage failure part-way
    /// leaves nothing behind.
    pub async fn create_submission(
        pool: &PgPool,
        input: &ValidatedSubmission,
    ) -> Result<Employee, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO employees \
                (referral_id, role, position, location, name, email, phone, \
                 guardian_name, guardian_phone, address, status, submission_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        let candidate = &input.employee;
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(&candidate.referral_id)
            .bind(&candidate.role)
            .bind(&candidate.position)
            .bind(&candidate.location)
            .bind(&candidate.name)
            .bind(&candidate.email)
            .bind(&candidate.phone)
            .bind(&candidate.guardian_name)
            .bind(&candidate.guardian_phone)
            .bind(&candidate.address)
            .bind(STATUS_PENDING)
            .bind(candidate.submission_date)
            .fetch_one(&mut *tx)
            .await?;

        for (document_type, doc) in &input.documents {
            DocumentRepo::upsert(&mut *tx, employee.id, document_type, doc).await?;
        }

        if let Some(previous) = &input.previous_employment {
            PreviousEmploymentRepo::upsert(&mut *tx, employee.id, previous).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            employee_id = employee.id,
            documents = input.documents.len(),
            has_previous_employment = input.previous_employment.is_some(),
            "Submission persisted"
        );

        Ok(employee)
    }

    /// Find an employee row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch only the status column of an employee.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT status FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark an employee approved, stamping `approval_date`.
    ///
    /// Applies from any current status. Rejection columns are cleared so
    /// that exactly one decision date is set. Returns `None` if the ID does
    /// not exist.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees \
             SET status = $2, approval_date = NOW(), \
                 rejection_date = NULL, rejection_reason = NULL \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(STATUS_APPROVED)
            .fetch_optional(pool)
            .await
    }

    /// Mark an employee rejected with a reason, stamping `rejection_date`.
    ///
    /// Returns `None` if the ID does not exist.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees \
             SET status = $2, rejection_reason = $3, rejection_date = NOW(), \
                 approval_date = NULL \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(STATUS_REJECTED)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Delete every employee whose ID is in `ids`. Owned rows go with them
    /// through `ON DELETE CASCADE`.
    ///
    /// Returns the number of employees removed; IDs that do not exist are
    /// ignored.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove all onboarding data, children before parents.
    ///
    /// Returns the number of employees removed.
    pub async fn clear_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM offer_letters")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM documents").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM previous_employment")
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM employees")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Find the first employee matching all three candidate fields exactly,
    /// together with its offer letter if one exists.
    ///
    /// `referral_id` is not unique; when several employees match, the one
    /// with the lowest ID wins.
    pub async fn find_candidate_offer_letter(
        pool: &PgPool,
        lookup: &CandidateLookup,
    ) -> Result<Option<CandidateOfferLetter>, sqlx::Error> {
        sqlx::query_as::<_, CandidateOfferLetter>(
            "SELECT e.id, e.status, ol.file_name, ol.file_type, ol.file_data, ol.upload_date \
             FROM employees e \
             LEFT JOIN offer_letters ol ON ol.employee_id = e.id \
             WHERE e.email = $1 AND e.name = $2 AND e.referral_id = $3 \
             ORDER BY e.id ASC \
             LIMIT 1",
        )
        .bind(&lookup.email)
        .bind(&lookup.name)
        .bind(&lookup.referral_id)
        .fetch_optional(pool)
        .await
    }

    /// List every employee as a hydrated view, ordered by ID.
    pub async fn list_views(pool: &PgPool) -> Result<Vec<EmployeeView>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY e.id ASC");
        let rows = sqlx::query_as::<_, EmployeeWithRelations>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let documents = DocumentRepo::list_for_employees(pool, &ids).await?;

        Ok(projection::hydrate_all(rows, documents))
    }

    /// Fetch one employee as a hydrated view.
    pub async fn find_view(pool: &PgPool, id: DbId) -> Result<Option<EmployeeView>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE e.id = $1");
        let Some(row) = sqlx::query_as::<_, EmployeeWithRelations>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let documents = DocumentRepo::list_for_employee(pool, id).await?;
        Ok(Some(projection::hydrate(
            row,
            projection::document_map(documents),
        )))
    }
}
