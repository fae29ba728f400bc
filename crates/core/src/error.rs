use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than a primary key matched nothing.
    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The record's status does not allow the requested action.
    #[error("Not approved: {0}")]
    NotApproved(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
