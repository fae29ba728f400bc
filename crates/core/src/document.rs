//! Document payload validation and data-URL framing.
//!
//! All file content in the system is stored and returned as a data URL of
//! the form `data:<mime>;base64,<payload>`. Documents arrive either already
//! framed (inside a JSON submission) or as raw multipart bytes; both paths
//! go through [`validate`] and come out as the same [`ValidatedDocument`].

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted size of a raw upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// PDF content type.
pub const MIME_PDF: &str = "application/pdf";
/// JPEG content type.
pub const MIME_JPEG: &str = "image/jpeg";
/// PNG content type.
pub const MIME_PNG: &str = "image/png";

/// Content types accepted for raw uploads.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_JPEG, MIME_PNG];

/// Shape of a framed payload. Capture 1 is the mime token, capture 2 the body.
const DATA_URL_PATTERN: &str = r"^data:([a-zA-Z0-9/+]+);base64,([a-zA-Z0-9/+=]+)$";

static DATA_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATA_URL_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a document payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("No file uploaded")]
    Missing,

    #[error("File is not a valid base64 data URL")]
    InvalidEncoding,

    #[error("File size exceeds 5MB")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Only PDF, JPEG, and PNG files are allowed")]
    UnsupportedType(String),
}

impl From<DocumentError> for CoreError {
    fn from(err: DocumentError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Where a document's content comes from.
#[derive(Debug, Clone, Copy)]
pub enum DocumentSource<'a> {
    /// Content already framed as a data URL.
    DataUrl(&'a str),
    /// Raw bytes with the content type declared by the uploader.
    Upload {
        bytes: &'a [u8],
        content_type: &'a str,
    },
}

/// Everything the codec needs to validate one document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentDescriptor<'a> {
    pub file_name: Option<&'a str>,
    /// Declared content type. For data URLs this falls back to the mime token
    /// inside the URL when absent.
    pub mime_type: Option<&'a str>,
    pub source: DocumentSource<'a>,
    pub upload_date: Option<Timestamp>,
}

/// A document that passed validation, in its canonical stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDocument {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data_url: String,
    pub upload_date: Timestamp,
}

/// The decoded content of a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Validate a document and produce its canonical stored form.
///
/// No partial success: either every check passes or the first failing one
/// is returned. `upload_date` defaults to the current time.
pub fn validate(descriptor: DocumentDescriptor<'_>) -> Result<ValidatedDocument, DocumentError> {
    let (mime_type, data_url) = match descriptor.source {
        DocumentSource::DataUrl(data_url) => {
            let embedded = parse_data_url(data_url)?.0;
            let mime = descriptor.mime_type.unwrap_or(embedded);
            (mime.to_string(), data_url.to_string())
        }
        DocumentSource::Upload {
            bytes,
            content_type,
        } => {
            validate_upload(bytes, content_type)?;
            (content_type.to_string(), frame_data_url(content_type, bytes))
        }
    };

    Ok(ValidatedDocument {
        file_name: descriptor.file_name.map(str::to_string),
        mime_type,
        data_url,
        upload_date: descriptor.upload_date.unwrap_or_else(chrono::Utc::now),
    })
}

/// Check a raw upload against the size limit and content-type allowlist.
pub fn validate_upload(bytes: &[u8], content_type: &str) -> Result<(), DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Missing);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(DocumentError::PayloadTooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    if !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(DocumentError::UnsupportedType(content_type.to_string()));
    }
    Ok(())
}

/// Frame raw bytes as `data:<mime>;base64,<payload>`.
pub fn frame_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Decode a data URL back into its content type and original bytes.
pub fn decode_data_url(data_url: &str) -> Result<DecodedPayload, DocumentError> {
    let (mime_type, body) = parse_data_url(data_url)?;
    let bytes = STANDARD
        .decode(body)
        .map_err(|_| DocumentError::InvalidEncoding)?;
    Ok(DecodedPayload {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// Split a data URL into its mime token and base64 body.
fn parse_data_url(data_url: &str) -> Result<(&str, &str), DocumentError> {
    if data_url.is_empty() {
        return Err(DocumentError::Missing);
    }
    let caps = DATA_URL_RE
        .captures(data_url)
        .ok_or(DocumentError::InvalidEncoding)?;
    match (caps.get(1), caps.get(2)) {
        (Some(mime), Some(body)) => Ok((mime.as_str(), body.as_str())),
        _ => Err(DocumentError::InvalidEncoding),
    }
}
