//! Admin surface (`/admin-panel/...`)
//!
//! Every route here sits behind the Admin role gate.

mod attendance;
mod dashboard;
mod employees;
mod notices;
mod requests;
mod work;

use axum::routing::get;
use axum::{Router, middleware};
use shared::ChoiceOption;
use shared::models::Role;
use sqlx::SqlitePool;

use crate::auth::require_role;
use crate::db::{RepoResult, identities};
use crate::state::AppState;

/// Rows shown in each dashboard panel
const RECENT: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin-panel/", get(dashboard::dashboard))
        // Employees
        .route("/admin-panel/employees/", get(employees::list))
        .route(
            "/admin-panel/employees/add/",
            get(employees::add_page).post(employees::add),
        )
        .route(
            "/admin-panel/employees/edit/{id}/",
            get(employees::edit_page).post(employees::edit),
        )
        .route(
            "/admin-panel/employees/delete/{id}/",
            get(employees::confirm_delete).post(employees::delete),
        )
        // Notices
        .route("/admin-panel/notices/", get(notices::list))
        .route(
            "/admin-panel/notices/create/",
            get(notices::create_page).post(notices::create),
        )
        .route(
            "/admin-panel/notices/edit/{id}/",
            get(notices::edit_page).post(notices::edit),
        )
        .route(
            "/admin-panel/notices/delete/{id}/",
            get(notices::confirm_delete).post(notices::delete),
        )
        // Attendance
        .route("/admin-panel/attendance/", get(attendance::list))
        .route(
            "/admin-panel/attendance/add/",
            get(attendance::add_page).post(attendance::add),
        )
        .route(
            "/admin-panel/attendance/edit/{id}/",
            get(attendance::edit_page).post(attendance::edit),
        )
        // Work
        .route("/admin-panel/work/", get(work::list))
        .route(
            "/admin-panel/work/create/",
            get(work::create_page).post(work::create),
        )
        // Requests
        .route("/admin-panel/requests/", get(requests::list))
        .route(
            "/admin-panel/requests/respond/{id}/",
            get(requests::respond_page).post(requests::respond),
        )
        .route_layer(middleware::from_fn_with_state(Role::Admin, require_role))
}

/// Selector options: Employee-role identities only
async fn employee_choices(pool: &SqlitePool) -> RepoResult<Vec<ChoiceOption>> {
    let employees = identities::list_employees(pool).await?;
    Ok(employees
        .iter()
        .map(|e| ChoiceOption::new(e.id.to_string(), e.username.as_str()))
        .collect())
}
