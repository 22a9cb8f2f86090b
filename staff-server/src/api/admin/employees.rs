//! Employee accounts: list, add, edit, delete

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::Identity;
use shared::FieldErrors;

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::identities;
use crate::forms::employee::{EmployeeForm, FIELDS, duplicate_from};
use crate::state::AppState;
use crate::web::{SeeOther, View};

const LIST: &str = "/admin-panel/employees/";

fn form_view(action: &'static str, form: &EmployeeForm, errors: &FieldErrors) -> View {
    View::form("admin_panel/employee_form", FIELDS, form, errors).with("action", action)
}

async fn find(state: &AppState, id: i64) -> Result<Identity, AppError> {
    identities::find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::IdentityNotFound))
}

/// GET /admin-panel/employees/
pub async fn list(State(state): State<AppState>) -> WebResult {
    let employees = identities::list_employees(&state.pool).await?;
    Ok(View::new("admin_panel/employee_list")
        .with("employees", employees)
        .into_response())
}

/// GET /admin-panel/employees/add/
pub async fn add_page() -> WebResult {
    Ok(form_view("Add", &EmployeeForm::default(), &FieldErrors::new()).into_response())
}

/// POST /admin-panel/employees/add/ - the new account always has the Employee role
pub async fn add(
    State(state): State<AppState>,
    admin: CurrentUser,
    Form(form): Form<EmployeeForm>,
) -> WebResult {
    let submitted = form.clone();
    let data = match form.clean_create(&state.pool).await {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| form_view("Add", &submitted, errors)),
    };
    let employee = match identities::create(&state.pool, data).await {
        Ok(employee) => employee,
        Err(e) => return duplicate_from(e).rerender(|errors| form_view("Add", &submitted, errors)),
    };

    tracing::info!(admin_id = admin.id, employee_id = employee.id, username = %employee.username, "Employee added");
    Ok(SeeOther::to(LIST)
        .success(format!("Employee {} added successfully!", employee.username))
        .into_response())
}

/// GET /admin-panel/employees/edit/{id}/
pub async fn edit_page(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let employee = find(&state, id).await?;
    Ok(form_view("Edit", &EmployeeForm::from_identity(&employee), &FieldErrors::new())
        .with("employee", &employee)
        .into_response())
}

/// POST /admin-panel/employees/edit/{id}/ - a blank password keeps the current one
pub async fn edit(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> WebResult {
    let employee = find(&state, id).await?;
    let submitted = form.clone();
    let view = |errors: &FieldErrors| form_view("Edit", &submitted, errors).with("employee", &employee);

    let data = match form.clean_update(&state.pool, id).await {
        Ok(data) => data,
        Err(err) => return err.rerender(view),
    };
    let updated = match identities::update_employee(&state.pool, id, data).await {
        Ok(updated) => updated,
        Err(e) => return duplicate_from(e).rerender(view),
    };

    tracing::info!(admin_id = admin.id, employee_id = id, username = %updated.username, "Employee updated");
    Ok(SeeOther::to(LIST)
        .success(format!("Employee {} updated successfully!", updated.username))
        .into_response())
}

/// GET /admin-panel/employees/delete/{id}/
pub async fn confirm_delete(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let employee = find(&state, id).await?;
    Ok(View::new("admin_panel/employee_confirm_delete")
        .with("employee", &employee)
        .into_response())
}

/// POST /admin-panel/employees/delete/{id}/ - removes the employee's records too
pub async fn delete(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> WebResult {
    let employee = find(&state, id).await?;
    if !identities::delete_employee(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::IdentityNotFound));
    }

    tracing::info!(admin_id = admin.id, employee_id = id, username = %employee.username, "Employee deleted");
    Ok(SeeOther::to(LIST)
        .success(format!("Employee {} deleted successfully!", employee.username))
        .into_response())
}
