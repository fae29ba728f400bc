//! Shared response body types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` acknowledgement body for actions that do
/// not return a resource.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
