//! Shared types for the staff portal
//!
//! Error types, form choices, domain models and utilities used by
//! staff-server and anything that talks to it.

pub mod error;
pub mod form;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode, FieldErrors};
pub use form::{Choice, ChoiceOption};
pub use http;
pub use serde::{Deserialize, Serialize};
