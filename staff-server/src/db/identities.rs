//! Identity Repository

use super::{RepoError, RepoResult};
use shared::models::{Identity, IdentityCreate, IdentityUpdate, ProfileUpdate, Role};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, email, first_name, last_name, role, employee_id, department, \
                       phone, profile_picture, password_hash, is_active, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Identity>> {
    let sql = format!("SELECT {COLUMNS} FROM identity WHERE id = ?");
    let row = sqlx::query_as::<_, Identity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Identity>> {
    let sql = format!("SELECT {COLUMNS} FROM identity WHERE username = ?");
    let row = sqlx::query_as::<_, Identity>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find an identity only if it holds the Employee role
pub async fn find_employee(pool: &SqlitePool, id: i64) -> RepoResult<Option<Identity>> {
    let sql = format!("SELECT {COLUMNS} FROM identity WHERE id = ? AND role = 'EMPLOYEE'");
    let row = sqlx::query_as::<_, Identity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All Employee-role identities, ordered by username
pub async fn list_employees(pool: &SqlitePool) -> RepoResult<Vec<Identity>> {
    let sql = format!("SELECT {COLUMNS} FROM identity WHERE role = 'EMPLOYEE' ORDER BY username");
    let rows = sqlx::query_as::<_, Identity>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count_employees(pool: &SqlitePool) -> RepoResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM identity WHERE role = 'EMPLOYEE'")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Whether `username` belongs to an identity other than `except`
pub async fn username_taken(
    pool: &SqlitePool,
    username: &str,
    except: Option<i64>,
) -> RepoResult<bool> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM identity WHERE username = ? AND id IS NOT ?")
            .bind(username)
            .bind(except)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Whether `employee_id` belongs to an identity other than `except`
pub async fn employee_id_taken(
    pool: &SqlitePool,
    employee_id: &str,
    except: Option<i64>,
) -> RepoResult<bool> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM identity WHERE employee_id = ? AND id IS NOT ?")
            .bind(employee_id)
            .bind(except)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: IdentityCreate) -> RepoResult<Identity> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO identity (id, username, email, first_name, last_name, role, employee_id, \
         department, phone, profile_picture, password_hash, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.role)
    .bind(&data.employee_id)
    .bind(&data.department)
    .bind(&data.phone)
    .bind(&data.profile_picture)
    .bind(&data.password_hash)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create identity".into()))
}

/// Update an Employee-role identity; the role itself never changes here
pub async fn update_employee(
    pool: &SqlitePool,
    id: i64,
    data: IdentityUpdate,
) -> RepoResult<Identity> {
    let result = sqlx::query(
        "UPDATE identity SET username = ?, email = ?, first_name = ?, last_name = ?, \
         employee_id = ?, department = ?, phone = ?, profile_picture = ?, \
         password_hash = COALESCE(?, password_hash) \
         WHERE id = ? AND role = 'EMPLOYEE'",
    )
    .bind(&data.username)
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.employee_id)
    .bind(&data.department)
    .bind(&data.phone)
    .bind(&data.profile_picture)
    .bind(&data.password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id}")))
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    data: ProfileUpdate,
) -> RepoResult<Identity> {
    let result = sqlx::query(
        "UPDATE identity SET first_name = ?, last_name = ?, email = ?, phone = ?, \
         department = ?, profile_picture = ? WHERE id = ?",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.department)
    .bind(&data.profile_picture)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Identity {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Identity {id}")))
}

/// Delete an Employee-role identity; their records go with them
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM identity WHERE id = ? AND role = 'EMPLOYEE'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Create the administrator account, or reset its password, role and active flag
pub async fn ensure_admin(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<Identity> {
    if let Some(existing) = find_by_username(pool, username).await? {
        sqlx::query(
            "UPDATE identity SET role = ?, password_hash = ?, is_active = 1 WHERE id = ?",
        )
        .bind(Role::Admin)
        .bind(password_hash)
        .bind(existing.id)
        .execute(pool)
        .await?;
        return find_by_id(pool, existing.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Identity {}", existing.id)));
    }

    create(
        pool,
        IdentityCreate {
            username: username.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Admin,
            employee_id: None,
            department: String::new(),
            phone: String::new(),
            profile_picture: None,
            password_hash: password_hash.to_string(),
        },
    )
    .await
}
