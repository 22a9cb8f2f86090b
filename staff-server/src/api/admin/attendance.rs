//! Attendance records: list, add, edit
//!
//! One record per employee and day; a second record for the same pair is
//! answered with `409 Conflict` and the form re-rendered.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::AttendanceStatus;
use shared::{Choice, ChoiceOption, FieldErrors};

use super::employee_choices;
use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::attendance;
use crate::forms::attendance::{AttendanceForm, FIELDS, conflict_from};
use crate::state::AppState;
use crate::web::{SeeOther, View};

const LIST: &str = "/admin-panel/attendance/";

fn form_view(
    action: &'static str,
    form: &AttendanceForm,
    errors: &FieldErrors,
    employees: &[ChoiceOption],
) -> View {
    View::form("admin_panel/attendance_form", FIELDS, form, errors)
        .with("action", action)
        .with("employees", employees)
        .with("statuses", AttendanceStatus::options())
}

pub async fn list(State(state): State<AppState>) -> WebResult {
    let records = attendance::list(&state.pool).await?;
    Ok(View::new("admin_panel/attendance_list")
        .with("attendance_records", records)
        .into_response())
}

pub async fn add_page(State(state): State<AppState>) -> WebResult {
    let employees = employee_choices(&state.pool).await?;
    Ok(form_view("Add", &AttendanceForm::initial(), &FieldErrors::new(), &employees).into_response())
}

pub async fn add(
    State(state): State<AppState>,
    admin: CurrentUser,
    Form(form): Form<AttendanceForm>,
) -> WebResult {
    let employees = employee_choices(&state.pool).await?;
    let submitted = form.clone();
    let view = |errors: &FieldErrors| form_view("Add", &submitted, errors, &employees);

    let data = match form.clean(&state.pool, None).await {
        Ok(data) => data,
        Err(err) => return err.rerender(view),
    };
    let record = match attendance::create(&state.pool, data).await {
        Ok(record) => record,
        Err(e) => return conflict_from(e).rerender(view),
    };

    tracing::info!(
        admin_id = admin.id,
        attendance_id = record.id,
        employee = record.employee,
        date = %record.date,
        "Attendance recorded"
    );
    Ok(SeeOther::to(LIST)
        .success("Attendance record added successfully!")
        .into_response())
}

pub async fn edit_page(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let record = attendance::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AttendanceNotFound))?;
    let employees = employee_choices(&state.pool).await?;

    Ok(form_view("Edit", &AttendanceForm::from_record(&record), &FieldErrors::new(), &employees)
        .with("record", &record)
        .into_response())
}

pub async fn edit(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<AttendanceForm>,
) -> WebResult {
    let record = attendance::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AttendanceNotFound))?;
    let employees = employee_choices(&state.pool).await?;
    let submitted = form.clone();
    let view = |errors: &FieldErrors| {
        form_view("Edit", &submitted, errors, &employees).with("record", &record)
    };

    let data = match form.clean(&state.pool, Some(id)).await {
        Ok(data) => data,
        Err(err) => return err.rerender(view),
    };
    if let Err(e) = attendance::update(&state.pool, id, data).await {
        return conflict_from(e).rerender(view);
    }

    tracing::info!(admin_id = admin.id, attendance_id = id, "Attendance updated");
    Ok(SeeOther::to(LIST)
        .success("Attendance record updated successfully!")
        .into_response())
}
