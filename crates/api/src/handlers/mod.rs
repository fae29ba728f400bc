//! Request handlers.
//!
//! Handlers validate input through `onboard_core`, delegate persistence to
//! the repositories in `onboard_db` and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod candidate;
pub mod documents;
pub mod employee;
