//! Employee Request Repository

use super::{RepoError, RepoResult};
use shared::models::{EmployeeRequest, RequestCreate, RequestReply, RequestStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT r.id, r.employee, i.username AS employee_username, r.request_type, \
                      r.subject, r.description, r.submitted_date, r.status, r.admin_response, \
                      r.responded_date \
                      FROM employee_request r JOIN identity i ON i.id = r.employee";

const NEWEST_FIRST: &str = "ORDER BY r.submitted_date DESC, r.id DESC";

/// All requests, newest first; `limit` caps the count when given
pub async fn list(pool: &SqlitePool, limit: Option<i64>) -> RepoResult<Vec<EmployeeRequest>> {
    let sql = format!("{SELECT} {NEWEST_FIRST} LIMIT ?");
    let rows = sqlx::query_as::<_, EmployeeRequest>(&sql)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_for_employee(
    pool: &SqlitePool,
    employee: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<EmployeeRequest>> {
    let sql = format!("{SELECT} WHERE r.employee = ? {NEWEST_FIRST} LIMIT ?");
    let rows = sqlx::query_as::<_, EmployeeRequest>(&sql)
        .bind(employee)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<EmployeeRequest>> {
    let sql = format!("{SELECT} WHERE r.id = ?");
    let row = sqlx::query_as::<_, EmployeeRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find a request only if `employee` submitted it
pub async fn find_for_employee(
    pool: &SqlitePool,
    id: i64,
    employee: i64,
) -> RepoResult<Option<EmployeeRequest>> {
    let sql = format!("{SELECT} WHERE r.id = ? AND r.employee = ?");
    let row = sqlx::query_as::<_, EmployeeRequest>(&sql)
        .bind(id)
        .bind(employee)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count_pending(pool: &SqlitePool) -> RepoResult<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM employee_request WHERE status = 'PENDING'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Submit a request on behalf of `employee`; starts Pending with no response
pub async fn create(
    pool: &SqlitePool,
    employee: i64,
    data: RequestCreate,
) -> RepoResult<EmployeeRequest> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO employee_request (id, employee, request_type, subject, description, \
         submitted_date, status, admin_response, responded_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?, '', NULL)",
    )
    .bind(id)
    .bind(employee)
    .bind(data.request_type)
    .bind(&data.subject)
    .bind(&data.description)
    .bind(now_millis())
    .bind(RequestStatus::Pending)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create request".into()))
}

/// Record the administrator's decision.
///
/// Any non-Pending status stamps `responded_date`; moving back to Pending
/// clears it.
pub async fn respond(
    pool: &SqlitePool,
    id: i64,
    data: RequestReply,
) -> RepoResult<EmployeeRequest> {
    let responded_date = (data.status != RequestStatus::Pending).then(now_millis);
    let result = sqlx::query(
        "UPDATE employee_request SET status = ?, admin_response = ?, responded_date = ? \
         WHERE id = ?",
    )
    .bind(data.status)
    .bind(&data.admin_response)
    .bind(responded_date)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Request {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Request {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{identity, pool};
    use shared::models::{RequestType, Role};

    fn submission(subject: &str) -> RequestCreate {
        RequestCreate {
            request_type: RequestType::Leave,
            subject: subject.into(),
            description: "Family event".into(),
        }
    }

    fn reply(status: RequestStatus) -> RequestReply {
        RequestReply {
            status,
            admin_response: "Noted".into(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;

        let req = create(&pool, emp.id, submission("Day off")).await.unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.employee_username, "jdoe");
        assert!(req.admin_response.is_empty());
        assert!(req.responded_date.is_none());
        assert!(req.submitted_date > 0);
        assert_eq!(count_pending(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_respond_stamps_unless_pending() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let req = create(&pool, emp.id, submission("Day off")).await.unwrap();

        let approved = respond(&pool, req.id, reply(RequestStatus::Approved)).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.admin_response, "Noted");
        assert!(approved.responded_date.is_some());
        assert_eq!(count_pending(&pool).await.unwrap(), 0);

        let reopened = respond(&pool, req.id, reply(RequestStatus::Pending)).await.unwrap();
        assert!(reopened.responded_date.is_none());

        assert!(matches!(
            respond(&pool, 42, reply(RequestStatus::Rejected)).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_second_response_replaces_first() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let req = create(&pool, emp.id, submission("Day off")).await.unwrap();

        let first = respond(&pool, req.id, reply(RequestStatus::Approved)).await.unwrap();
        let first_stamp = first.responded_date.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let second = respond(
            &pool,
            req.id,
            RequestReply {
                status: RequestStatus::Rejected,
                admin_response: "Team is short that week".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(second.status, RequestStatus::Rejected);
        assert_eq!(second.admin_response, "Team is short that week");
        assert!(second.responded_date.unwrap() >= first_stamp);
    }

    #[tokio::test]
    async fn test_employee_scope() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let other = identity(&pool, "other", Role::Employee).await;
        let mine = create(&pool, emp.id, submission("Mine")).await.unwrap();
        create(&pool, other.id, submission("Theirs")).await.unwrap();
        create(&pool, other.id, submission("Theirs again")).await.unwrap();

        assert!(find_for_employee(&pool, mine.id, emp.id).await.unwrap().is_some());
        assert!(find_for_employee(&pool, mine.id, other.id).await.unwrap().is_none());
        assert_eq!(list_for_employee(&pool, emp.id, None).await.unwrap().len(), 1);
        assert_eq!(list_for_employee(&pool, other.id, Some(1)).await.unwrap().len(), 1);
        assert_eq!(list(&pool, None).await.unwrap().len(), 3);
    }
}
