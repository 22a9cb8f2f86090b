//! Attendance Repository
//!
//! One row per (employee, date), enforced by a UNIQUE constraint. Inserts and
//! updates that collide surface as [`RepoError::Duplicate`].

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Attendance, AttendanceInput};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

/// Column marker for the (employee, date) constraint in driver messages
pub const UNIQUE_EMPLOYEE_DATE: &str = "attendance.employee";

const SELECT: &str = "SELECT a.id, a.employee, i.username AS employee_username, a.date, \
                      a.check_in, a.check_out, a.status, a.notes \
                      FROM attendance a JOIN identity i ON i.id = a.employee";

/// All records, most recent date first
pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<Attendance>> {
    let sql = format!("{SELECT} ORDER BY a.date DESC, i.username");
    let rows = sqlx::query_as::<_, Attendance>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn list_for_employee(pool: &SqlitePool, employee: i64) -> RepoResult<Vec<Attendance>> {
    let sql = format!("{SELECT} WHERE a.employee = ? ORDER BY a.date DESC");
    let rows = sqlx::query_as::<_, Attendance>(&sql)
        .bind(employee)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Attendance>> {
    let sql = format!("{SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, Attendance>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Whether a record other than `except` exists for this employee and date
pub async fn exists_for(
    pool: &SqlitePool,
    employee: i64,
    date: NaiveDate,
    except: Option<i64>,
) -> RepoResult<bool> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM attendance WHERE employee = ? AND date = ? AND id IS NOT ?",
    )
    .bind(employee)
    .bind(date)
    .bind(except)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: AttendanceInput) -> RepoResult<Attendance> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO attendance (id, employee, date, check_in, check_out, status, notes) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.employee)
    .bind(data.date)
    .bind(data.check_in)
    .bind(data.check_out)
    .bind(data.status)
    .bind(&data.notes)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create attendance".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AttendanceInput) -> RepoResult<Attendance> {
    let result = sqlx::query(
        "UPDATE attendance SET employee = ?, date = ?, check_in = ?, check_out = ?, \
         status = ?, notes = ? WHERE id = ?",
    )
    .bind(data.employee)
    .bind(data.date)
    .bind(data.check_in)
    .bind(data.check_out)
    .bind(data.status)
    .bind(&data.notes)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Attendance {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Attendance {id}")))
}
