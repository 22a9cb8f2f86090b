//! Own work assignments: list, detail, progress update

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::{Work, WorkStatus};
use shared::{Choice, FieldErrors};

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::work;
use crate::forms::work::{PROGRESS_FIELDS, WorkProgressForm};
use crate::state::AppState;
use crate::web::{SeeOther, View};

async fn find_own(state: &AppState, user: &CurrentUser, id: i64) -> Result<Work, AppError> {
    work::find_for_assignee(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WorkNotFound))
}

fn update_view(form: &WorkProgressForm, errors: &FieldErrors, assignment: &Work) -> View {
    View::form("employee_panel/work_update", PROGRESS_FIELDS, form, errors)
        .with("work", assignment)
        .with("statuses", WorkStatus::options())
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> WebResult {
    let works = work::list_for_assignee(&state.pool, user.id, None).await?;
    Ok(View::new("employee_panel/work_list")
        .with("works", works)
        .into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> WebResult {
    let assignment = find_own(&state, &user, id).await?;
    Ok(View::new("employee_panel/work_detail")
        .with("work", &assignment)
        .into_response())
}

pub async fn update_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> WebResult {
    let assignment = find_own(&state, &user, id).await?;
    let form = WorkProgressForm::from_work(&assignment);
    Ok(update_view(&form, &FieldErrors::new(), &assignment).into_response())
}

/// POST /employee-panel/work/{id}/update/ - Completed stamps the completion time
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<WorkProgressForm>,
) -> WebResult {
    let assignment = find_own(&state, &user, id).await?;
    let submitted = form.clone();
    let progress = match form.clean() {
        Ok(progress) => progress,
        Err(err) => return err.rerender(|errors| update_view(&submitted, errors, &assignment)),
    };
    let updated = work::update_progress(&state.pool, id, user.id, progress).await?;

    tracing::info!(
        user_id = user.id,
        work_id = id,
        status = updated.status.as_str(),
        "Work progress updated"
    );
    Ok(SeeOther::to("/employee-panel/work/")
        .success("Work status updated successfully!")
        .into_response())
}
