//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (or, for statements that may run inside a transaction, any
//! `PgExecutor`) as the first argument.

pub mod document_repo;
pub mod employee_repo;
pub mod offer_letter_repo;
pub mod previous_employment_repo;

pub use document_repo::DocumentRepo;
pub use employee_repo::EmployeeRepo;
pub use offer_letter_repo::OfferLetterRepo;
pub use previous_employment_repo::PreviousEmploymentRepo;
