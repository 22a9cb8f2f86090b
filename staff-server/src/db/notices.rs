//! Notice Repository

use super::{RepoError, RepoResult};
use shared::models::{Notice, NoticeInput};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT n.id, n.title, n.content, n.published_by, \
                      i.username AS published_by_name, n.published_date, n.is_active \
                      FROM notice n JOIN identity i ON i.id = n.published_by";

/// All notices, newest first
pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<Notice>> {
    let sql = format!("{SELECT} ORDER BY n.published_date DESC, n.id DESC");
    let rows = sqlx::query_as::<_, Notice>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Active notices, newest first; `limit` caps the count when given
pub async fn list_active(pool: &SqlitePool, limit: Option<i64>) -> RepoResult<Vec<Notice>> {
    let sql = format!(
        "{SELECT} WHERE n.is_active = 1 ORDER BY n.published_date DESC, n.id DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, Notice>(&sql)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_active(pool: &SqlitePool) -> RepoResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notice WHERE is_active = 1")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notice>> {
    let sql = format!("{SELECT} WHERE n.id = ?");
    let row = sqlx::query_as::<_, Notice>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Publish a notice stamped with its publisher and the current time
pub async fn create(pool: &SqlitePool, published_by: i64, data: NoticeInput) -> RepoResult<Notice> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO notice (id, title, content, published_by, published_date, is_active) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.content)
    .bind(published_by)
    .bind(now_millis())
    .bind(data.is_active)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create notice".into()))
}

/// Edit title, content and visibility; publisher and date stay as first stamped
pub async fn update(pool: &SqlitePool, id: i64, data: NoticeInput) -> RepoResult<Notice> {
    let result = sqlx::query("UPDATE notice SET title = ?, content = ?, is_active = ? WHERE id = ?")
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.is_active)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Notice {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Notice {id}")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM notice WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
