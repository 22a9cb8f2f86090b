//! Notice Model

use serde::{Deserialize, Serialize};

/// Notice entity, joined with the publisher's username
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published_by: i64,
    pub published_by_name: String,
    pub published_date: i64,
    pub is_active: bool,
}

/// Create / edit notice payload
#[derive(Debug, Clone)]
pub struct NoticeInput {
    pub title: String,
    pub content: String,
    pub is_active: bool,
}
