//! Unified error system for the staff portal
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`FieldErrors`]: Per-field validation messages collected from a form
//! - [`ErrorBody`]: JSON body written for an [`AppError`]
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Identity errors
//! - 4xxx: Notice errors
//! - 5xxx: Attendance errors
//! - 6xxx: Work errors
//! - 7xxx: Request errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode, FieldErrors};
//!
//! let err = AppError::new(ErrorCode::NoticeNotFound);
//!
//! let mut fields = FieldErrors::new();
//! fields.add("title", "This field is required");
//! let err = AppError::invalid_fields(fields);
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 1);
//! ```

mod category;
mod codes;
mod fields;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use fields::FieldErrors;
pub use types::{AppError, AppResult, ErrorBody};
