//! Unified error codes for the staff portal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Identity (employee account) errors
//! - 4xxx: Notice errors
//! - 5xxx: Attendance errors
//! - 6xxx: Work assignment errors
//! - 7xxx: Employee request errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    ValidationFailed = 1,
    /// Missing record of a kind without its own code
    NotFound = 2,
    /// Unique constraint hit on a column no form field owns
    AlreadyExists = 3,
    RequiredField = 4,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    AccountDisabled = 1002,
    PasswordMismatch = 1003,
    PasswordTooShort = 1004,

    // ==================== 2xxx: Permission ====================
    /// Role not available for self-registration
    RoleNotAllowed = 2001,

    // ==================== 3xxx: Identity ====================
    IdentityNotFound = 3001,
    UsernameExists = 3002,
    EmployeeIdExists = 3003,
    /// Selector references an identity without the Employee role
    NotAnEmployee = 3004,

    // ==================== 4xxx: Notice ====================
    NoticeNotFound = 4001,

    // ==================== 5xxx: Attendance ====================
    AttendanceNotFound = 5001,
    /// Already recorded for this employee and date
    AttendanceExists = 5002,
    /// Check-out earlier than check-in
    AttendanceTimeOrder = 5003,

    // ==================== 6xxx: Work ====================
    WorkNotFound = 6001,

    // ==================== 7xxx: Request ====================
    RequestNotFound = 7001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
}

/// Every code, in numeric order
const ALL: &[ErrorCode] = &[
    ErrorCode::ValidationFailed,
    ErrorCode::NotFound,
    ErrorCode::AlreadyExists,
    ErrorCode::RequiredField,
    ErrorCode::NotAuthenticated,
    ErrorCode::AccountDisabled,
    ErrorCode::PasswordMismatch,
    ErrorCode::PasswordTooShort,
    ErrorCode::RoleNotAllowed,
    ErrorCode::IdentityNotFound,
    ErrorCode::UsernameExists,
    ErrorCode::EmployeeIdExists,
    ErrorCode::NotAnEmployee,
    ErrorCode::NoticeNotFound,
    ErrorCode::AttendanceNotFound,
    ErrorCode::AttendanceExists,
    ErrorCode::AttendanceTimeOrder,
    ErrorCode::WorkNotFound,
    ErrorCode::RequestNotFound,
    ErrorCode::InternalError,
    ErrorCode::DatabaseError,
];

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "This field is required",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PasswordMismatch => "The two password fields didn't match",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            ErrorCode::RoleNotAllowed => "This role cannot be chosen at registration",

            ErrorCode::IdentityNotFound => "Employee not found",
            ErrorCode::UsernameExists => "A user with that username already exists",
            ErrorCode::EmployeeIdExists => "A user with that employee ID already exists",
            ErrorCode::NotAnEmployee => "Select a valid employee",

            ErrorCode::NoticeNotFound => "Notice not found",

            ErrorCode::AttendanceNotFound => "Attendance record not found",
            ErrorCode::AttendanceExists => {
                "Attendance for this employee and date already exists"
            }
            ErrorCode::AttendanceTimeOrder => "Check-out cannot be earlier than check-in",

            ErrorCode::WorkNotFound => "Work assignment not found",

            ErrorCode::RequestNotFound => "Request not found",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ALL.iter()
            .copied()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
