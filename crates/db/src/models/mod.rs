//! Row structs for the onboarding tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a
//! database row. Write-side inputs are the validated types from
//! `onboard_core`, so there are no separate create DTOs here.

pub mod document;
pub mod employee;
pub mod offer_letter;
pub mod previous_employment;
