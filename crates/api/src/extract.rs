//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body that reports every rejection through [`AppError`].
///
/// An empty body is read as `{}` so handlers see missing fields rather than
/// a transport error. The content type is not checked. Malformed JSON is a
/// 400 with a generic message; the parser detail is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map(JsonBody).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            AppError::BadRequest("Invalid JSON request body".to_string())
        })
    }
}
