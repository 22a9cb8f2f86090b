//! Error category classification

use super::codes::ErrorCode;

/// Domain an [`ErrorCode`] belongs to, taken from its thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Identity,
    Notice,
    Attendance,
    Work,
    Request,
    /// 8xxx and above
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Identity,
            4 => Self::Notice,
            5 => Self::Attendance,
            6 => Self::Work,
            7 => Self::Request,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        let cases = [
            (0, ErrorCategory::General),
            (999, ErrorCategory::General),
            (1001, ErrorCategory::Auth),
            (2001, ErrorCategory::Permission),
            (3001, ErrorCategory::Identity),
            (4001, ErrorCategory::Notice),
            (5001, ErrorCategory::Attendance),
            (6001, ErrorCategory::Work),
            (7001, ErrorCategory::Request),
            (9001, ErrorCategory::System),
            (10000, ErrorCategory::System),
        ];
        for (code, category) in cases {
            assert_eq!(ErrorCategory::from_code(code), category, "{code}");
        }
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::RoleNotAllowed.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::UsernameExists.category(), ErrorCategory::Identity);
        assert_eq!(ErrorCode::AttendanceExists.category(), ErrorCategory::Attendance);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
