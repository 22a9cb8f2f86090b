//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound
            | Self::IdentityNotFound
            | Self::NoticeNotFound
            | Self::AttendanceNotFound
            | Self::WorkNotFound
            | Self::RequestNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::UsernameExists
            | Self::EmployeeIdExists
            | Self::AttendanceExists => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // Validation and form rules
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
