//! Work Assignment Repository

use super::{RepoError, RepoResult};
use serde::Serialize;
use shared::models::{Work, WorkCreate, WorkProgress, WorkStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT w.id, w.title, w.description, w.assigned_to, \
                      t.username AS assigned_to_username, w.assigned_by, \
                      b.username AS assigned_by_username, w.assigned_date, w.due_date, \
                      w.status, w.priority, w.completed_date, w.remarks \
                      FROM work w \
                      JOIN identity t ON t.id = w.assigned_to \
                      JOIN identity b ON b.id = w.assigned_by";

const NEWEST_FIRST: &str = "ORDER BY w.assigned_date DESC, w.id DESC";

/// Per-status totals for one assignee
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct WorkCounts {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

/// All assignments, newest first; `limit` caps the count when given
pub async fn list(pool: &SqlitePool, limit: Option<i64>) -> RepoResult<Vec<Work>> {
    let sql = format!("{SELECT} {NEWEST_FIRST} LIMIT ?");
    let rows = sqlx::query_as::<_, Work>(&sql)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_for_assignee(
    pool: &SqlitePool,
    assignee: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<Work>> {
    let sql = format!("{SELECT} WHERE w.assigned_to = ? {NEWEST_FIRST} LIMIT ?");
    let rows = sqlx::query_as::<_, Work>(&sql)
        .bind(assignee)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Work>> {
    let sql = format!("{SELECT} WHERE w.id = ?");
    let row = sqlx::query_as::<_, Work>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find an assignment only if it is assigned to `assignee`
pub async fn find_for_assignee(
    pool: &SqlitePool,
    id: i64,
    assignee: i64,
) -> RepoResult<Option<Work>> {
    let sql = format!("{SELECT} WHERE w.id = ? AND w.assigned_to = ?");
    let row = sqlx::query_as::<_, Work>(&sql)
        .bind(id)
        .bind(assignee)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Assignments still open (Pending or InProgress)
pub async fn count_active(pool: &SqlitePool) -> RepoResult<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM work WHERE status IN ('PENDING', 'IN_PROGRESS')")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn counts_for_assignee(pool: &SqlitePool, assignee: i64) -> RepoResult<WorkCounts> {
    let counts = sqlx::query_as::<_, WorkCounts>(
        "SELECT COUNT(*) AS total, \
         COALESCE(SUM(status = 'PENDING'), 0) AS pending, \
         COALESCE(SUM(status = 'IN_PROGRESS'), 0) AS in_progress, \
         COALESCE(SUM(status = 'COMPLETED'), 0) AS completed \
         FROM work WHERE assigned_to = ?",
    )
    .bind(assignee)
    .fetch_one(pool)
    .await?;
    Ok(counts)
}

/// Create an assignment stamped with its assigner; starts Pending
pub async fn create(pool: &SqlitePool, assigned_by: i64, data: WorkCreate) -> RepoResult<Work> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO work (id, title, description, assigned_to, assigned_by, assigned_date, \
         due_date, status, priority, completed_date, remarks) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, '')",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.assigned_to)
    .bind(assigned_by)
    .bind(now_millis())
    .bind(data.due_date)
    .bind(WorkStatus::Pending)
    .bind(data.priority)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create work".into()))
}

/// Record progress on the assignee's own work.
///
/// Completed stamps `completed_date` with the current time; any other status
/// clears it.
pub async fn update_progress(
    pool: &SqlitePool,
    id: i64,
    assignee: i64,
    data: WorkProgress,
) -> RepoResult<Work> {
    let completed_date = (data.status == WorkStatus::Completed).then(now_millis);
    let result = sqlx::query(
        "UPDATE work SET status = ?, remarks = ?, completed_date = ? \
         WHERE id = ? AND assigned_to = ?",
    )
    .bind(data.status)
    .bind(&data.remarks)
    .bind(completed_date)
    .bind(id)
    .bind(assignee)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Work {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Work {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{identity, pool};
    use chrono::NaiveDate;
    use shared::models::{Priority, Role};

    fn assignment(assigned_to: i64, title: &str) -> WorkCreate {
        WorkCreate {
            title: title.into(),
            description: "Do it".into(),
            assigned_to,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            priority: Priority::High,
        }
    }

    fn progress(status: WorkStatus) -> WorkProgress {
        WorkProgress {
            status,
            remarks: "note".into(),
        }
    }

    #[tokio::test]
    async fn test_create_stamps_assigner_and_starts_pending() {
        let pool = pool().await;
        let admin = identity(&pool, "boss", Role::Admin).await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;

        let work = create(&pool, admin.id, assignment(emp.id, "Report")).await.unwrap();
        assert_eq!(work.assigned_by, admin.id);
        assert_eq!(work.assigned_by_username, "boss");
        assert_eq!(work.assigned_to_username, "jdoe");
        assert_eq!(work.status, WorkStatus::Pending);
        assert_eq!(work.priority, Priority::High);
        assert!(work.completed_date.is_none());
    }

    #[tokio::test]
    async fn test_completed_date_follows_status() {
        let pool = pool().await;
        let admin = identity(&pool, "boss", Role::Admin).await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let work = create(&pool, admin.id, assignment(emp.id, "Report")).await.unwrap();

        let w = update_progress(&pool, work.id, emp.id, progress(WorkStatus::InProgress))
            .await
            .unwrap();
        assert!(w.completed_date.is_none());
        let w = update_progress(&pool, work.id, emp.id, progress(WorkStatus::InProgress))
            .await
            .unwrap();
        assert!(w.completed_date.is_none());

        let w = update_progress(&pool, work.id, emp.id, progress(WorkStatus::Completed))
            .await
            .unwrap();
        assert!(w.completed_date.is_some());
        assert_eq!(w.remarks, "note");

        let w = update_progress(&pool, work.id, emp.id, progress(WorkStatus::Cancelled))
            .await
            .unwrap();
        assert!(w.completed_date.is_none());
    }

    #[tokio::test]
    async fn test_assignee_scope() {
        let pool = pool().await;
        let admin = identity(&pool, "boss", Role::Admin).await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let other = identity(&pool, "other", Role::Employee).await;
        let work = create(&pool, admin.id, assignment(emp.id, "Mine")).await.unwrap();
        create(&pool, admin.id, assignment(other.id, "Theirs")).await.unwrap();

        assert!(find_for_assignee(&pool, work.id, other.id).await.unwrap().is_none());
        assert!(matches!(
            update_progress(&pool, work.id, other.id, progress(WorkStatus::Completed)).await,
            Err(RepoError::NotFound(_))
        ));
        let untouched = find_by_id(&pool, work.id).await.unwrap().unwrap();
        assert_eq!(untouched.status, WorkStatus::Pending);

        let mine = list_for_assignee(&pool, emp.id, None).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
        assert_eq!(list(&pool, None).await.unwrap().len(), 2);
        assert_eq!(list(&pool, Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_counts() {
        let pool = pool().await;
        let admin = identity(&pool, "boss", Role::Admin).await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;

        assert_eq!(
            counts_for_assignee(&pool, emp.id).await.unwrap(),
            WorkCounts::default()
        );

        let a = create(&pool, admin.id, assignment(emp.id, "A")).await.unwrap();
        let b = create(&pool, admin.id, assignment(emp.id, "B")).await.unwrap();
        create(&pool, admin.id, assignment(emp.id, "C")).await.unwrap();
        update_progress(&pool, a.id, emp.id, progress(WorkStatus::InProgress))
            .await
            .unwrap();
        update_progress(&pool, b.id, emp.id, progress(WorkStatus::Completed))
            .await
            .unwrap();

        assert_eq!(
            counts_for_assignee(&pool, emp.id).await.unwrap(),
            WorkCounts {
                total: 3,
                pending: 1,
                in_progress: 1,
                completed: 1,
            }
        );
        assert_eq!(count_active(&pool).await.unwrap(), 2);
    }
}
