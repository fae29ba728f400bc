//! Domain rules for the employee onboarding service.
//!
//! Everything in this crate is pure: no I/O, no database access. The `db`
//! and `api` crates build on these types and validators.

pub mod document;
pub mod error;
pub mod onboarding;
pub mod types;
