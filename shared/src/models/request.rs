//! Employee Request Model

use serde::{Deserialize, Serialize};

use crate::form::Choice;

/// What an employee is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RequestType {
    Leave,
    Equipment,
    Advance,
    Other,
}

impl Choice for RequestType {
    const ALL: &'static [Self] = &[Self::Leave, Self::Equipment, Self::Advance, Self::Other];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Leave => "LEAVE",
            Self::Equipment => "EQUIPMENT",
            Self::Advance => "ADVANCE",
            Self::Other => "OTHER",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Leave => "Leave Request",
            Self::Equipment => "Equipment",
            Self::Advance => "Salary Advance",
            Self::Other => "Other",
        }
    }
}

/// Review state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Choice for RequestStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Employee request, joined with the submitter's username
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeRequest {
    pub id: i64,
    pub employee: i64,
    pub employee_username: String,
    pub request_type: RequestType,
    pub subject: String,
    pub description: String,
    pub submitted_date: i64,
    pub status: RequestStatus,
    pub admin_response: String,
    /// Null while the request is Pending
    pub responded_date: Option<i64>,
}

/// Submit request payload (employee)
#[derive(Debug, Clone)]
pub struct RequestCreate {
    pub request_type: RequestType,
    pub subject: String,
    pub description: String,
}

/// Respond payload (admin)
#[derive(Debug, Clone)]
pub struct RequestReply {
    pub status: RequestStatus,
    pub admin_response: String,
}
