//! Repository for the `documents` table.

use onboard_core::document::ValidatedDocument;
use onboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::document::Document;

/// Column list for the `documents` table.
const COLUMNS: &str = "id, employee_id, document_type, file_name, file_type, file_data, \
    upload_date, created_at, updated_at";

/// Provides data access for document slots.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert or replace the document in slot `(employee_id, document_type)`.
    ///
    /// Concurrent writers to the same slot resolve last-commit-wins; exactly
    /// one row survives per slot.
    pub async fn upsert<'e, E>(
        executor: E,
        employee_id: DbId,
        document_type: &str,
        doc: &ValidatedDocument,
    ) -> Result<Document, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO documents \
                (employee_id, document_type, file_name, file_type, file_data, upload_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (employee_id, document_type) \
             DO UPDATE SET \
                file_name = EXCLUDED.file_name, \
                file_type = EXCLUDED.file_type, \
                file_data = EXCLUDED.file_data, \
                upload_date = EXCLUDED.upload_date \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(employee_id)
            .bind(document_type)
            .bind(&doc.file_name)
            .bind(&doc.mime_type)
            .bind(&doc.data_url)
            .bind(doc.upload_date)
            .fetch_one(executor)
            .await
    }

    /// Find the document in a single slot.
    pub async fn find(
        pool: &PgPool,
        employee_id: DbId,
        document_type: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE employee_id = $1 AND document_type = $2"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(employee_id)
            .bind(document_type)
            .fetch_optional(pool)
            .await
    }

    /// List every document of one employee, ordered by document type.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE employee_id = $1 ORDER BY document_type"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// List every document belonging to any of `employee_ids`.
    pub async fn list_for_employees(
        pool: &PgPool,
        employee_ids: &[DbId],
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE employee_id = ANY($1) \
             ORDER BY employee_id, document_type"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(employee_ids)
            .fetch_all(pool)
            .await
    }
}
