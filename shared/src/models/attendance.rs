//! Attendance Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::form::Choice;

/// Attendance status for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        Self::Present
    }
}

impl Choice for AttendanceStatus {
    const ALL: &'static [Self] = &[Self::Present, Self::Absent, Self::Leave, Self::HalfDay];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
            Self::Leave => "LEAVE",
            Self::HalfDay => "HALF_DAY",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Leave => "Leave",
            Self::HalfDay => "Half Day",
        }
    }
}

/// Attendance record (one per employee and date)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attendance {
    pub id: i64,
    pub employee: i64,
    pub employee_username: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: String,
}

/// Create / edit attendance payload
#[derive(Debug, Clone)]
pub struct AttendanceInput {
    pub employee: i64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: String,
}
