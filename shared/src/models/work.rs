//! Work Assignment Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::Choice;

/// Work progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WorkStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl Default for WorkStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Choice for WorkStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Work priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Choice for Priority {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Urgent];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

/// Work assignment, joined with assignee and assigner usernames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Work {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assigned_to: i64,
    pub assigned_to_username: String,
    pub assigned_by: i64,
    pub assigned_by_username: String,
    pub assigned_date: i64,
    pub due_date: NaiveDate,
    pub status: WorkStatus,
    pub priority: Priority,
    /// Set only while status is Completed
    pub completed_date: Option<i64>,
    pub remarks: String,
}

/// Create work payload (admin)
#[derive(Debug, Clone)]
pub struct WorkCreate {
    pub title: String,
    pub description: String,
    pub assigned_to: i64,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// Progress update payload (assignee)
#[derive(Debug, Clone)]
pub struct WorkProgress {
    pub status: WorkStatus,
    pub remarks: String,
}
