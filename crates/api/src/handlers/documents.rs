//! Handlers for multipart file uploads: document slots and offer letters.
//!
//! Both endpoints accept a multipart form with a `file` field and a
//! `docType` text field.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use onboard_core::document::{self, DocumentDescriptor, DocumentError, DocumentSource, ValidatedDocument};
use onboard_core::error::CoreError;
use onboard_core::onboarding::{
    ensure_offer_letter_allowed, validate_document_type, validate_offer_letter_tag,
    EmployeeStatus,
};
use onboard_core::types::DbId;
use onboard_db::repositories::{DocumentRepo, EmployeeRepo, OfferLetterRepo};

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Content type assumed when the uploader declares none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received in a multipart form.
#[derive(Debug)]
struct UploadedFile {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Run the file through the document codec.
    fn validate(&self) -> Result<ValidatedDocument, DocumentError> {
        document::validate(DocumentDescriptor {
            file_name: self.file_name.as_deref(),
            mime_type: None,
            source: DocumentSource::Upload {
                bytes: &self.bytes,
                content_type: &self.content_type,
            },
            upload_date: None,
        })
    }
}

/// The recognised fields of an upload form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    doc_type: Option<String>,
}

impl UploadForm {
    /// The uploaded file, or [`DocumentError::Missing`] if none was sent.
    fn require_file(&self) -> Result<&UploadedFile, CoreError> {
        self.file.as_ref().ok_or(DocumentError::Missing.into())
    }
}

/// Drain a multipart body into an [`UploadForm`]. Unknown fields are ignored.
async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "docType" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.doc_type = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// Parse a stored status. The column is constrained, so failure means the
/// schema and code disagree.
fn parse_status(status: &str) -> Result<EmployeeStatus, CoreError> {
    EmployeeStatus::from_str(status)
        .map_err(|e| CoreError::Internal(format!("Unreadable stored status: {e}")))
}

/// POST /api/employee/{id}/upload
///
/// Validates the file and upserts it into slot `docType`, replacing any
/// earlier upload for that slot. Allowed in every record status.
pub async fn upload_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let form = read_upload_form(multipart).await?;
    let file = form.require_file()?;
    let doc = file.validate().map_err(CoreError::from)?;
    let doc_type = validate_document_type(form.doc_type.as_deref())?;

    if EmployeeRepo::find_status(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }));
    }

    DocumentRepo::upsert(&state.pool, id, &doc_type, &doc).await?;

    tracing::info!(
        employee_id = id,
        doc_type = %doc_type,
        mime_type = %doc.mime_type,
        size_bytes = file.bytes.len(),
        "Document uploaded"
    );

    Ok(Json(MessageResponse::new(format!(
        "{doc_type} uploaded successfully"
    ))))
}

/// POST /api/employee/{id}/offer-letter
///
/// Requires `docType` = `offerLetter` and an approved employee. A record that
/// is not approved is refused whatever the file. Replaces any earlier offer
/// letter.
pub async fn upload_offer_letter(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let form = read_upload_form(multipart).await?;
    let file = form.require_file()?;
    validate_offer_letter_tag(form.doc_type.as_deref())?;

    // Approval gates the upload before the file content is inspected.
    let status = EmployeeRepo::find_status(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    ensure_offer_letter_allowed(parse_status(&status)?)?;

    let doc = file.validate().map_err(CoreError::from)?;

    OfferLetterRepo::upsert(&state.pool, id, &doc).await?;

    tracing::info!(
        employee_id = id,
        mime_type = %doc.mime_type,
        size_bytes = file.bytes.len(),
        "Offer letter uploaded"
    );

    Ok(Json(MessageResponse::new("Offer letter uploaded successfully")))
}
