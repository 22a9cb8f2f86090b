//! Notices: list, create, edit, delete

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::Notice;
use shared::FieldErrors;

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::notices;
use crate::forms::notice::{FIELDS, NoticeForm};
use crate::state::AppState;
use crate::web::{SeeOther, View};

const LIST: &str = "/admin-panel/notices/";

fn form_view(action: &'static str, form: &NoticeForm, errors: &FieldErrors) -> View {
    View::form("admin_panel/notice_form", FIELDS, form, errors).with("action", action)
}

async fn find(state: &AppState, id: i64) -> Result<Notice, AppError> {
    notices::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoticeNotFound))
}

pub async fn list(State(state): State<AppState>) -> WebResult {
    let notices = notices::list(&state.pool).await?;
    Ok(View::new("admin_panel/notice_list")
        .with("notices", notices)
        .into_response())
}

pub async fn create_page() -> WebResult {
    Ok(form_view("Create", &NoticeForm::initial(), &FieldErrors::new()).into_response())
}

/// POST /admin-panel/notices/create/ - published by the signed-in admin
pub async fn create(
    State(state): State<AppState>,
    admin: CurrentUser,
    Form(form): Form<NoticeForm>,
) -> WebResult {
    let submitted = form.clone();
    let data = match form.clean() {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| form_view("Create", &submitted, errors)),
    };
    let notice = notices::create(&state.pool, admin.id, data).await?;

    tracing::info!(admin_id = admin.id, notice_id = notice.id, "Notice published");
    Ok(SeeOther::to(LIST)
        .success("Notice published successfully!")
        .into_response())
}

pub async fn edit_page(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let notice = find(&state, id).await?;
    Ok(form_view("Edit", &NoticeForm::from_notice(&notice), &FieldErrors::new())
        .with("notice", &notice)
        .into_response())
}

pub async fn edit(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<NoticeForm>,
) -> WebResult {
    let notice = find(&state, id).await?;
    let submitted = form.clone();
    let data = match form.clean() {
        Ok(data) => data,
        Err(err) => {
            return err.rerender(|errors| {
                form_view("Edit", &submitted, errors).with("notice", &notice)
            });
        }
    };
    notices::update(&state.pool, id, data).await?;

    tracing::info!(admin_id = admin.id, notice_id = id, "Notice updated");
    Ok(SeeOther::to(LIST)
        .success("Notice updated successfully!")
        .into_response())
}

pub async fn confirm_delete(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let notice = find(&state, id).await?;
    Ok(View::new("admin_panel/notice_confirm_delete")
        .with("notice", &notice)
        .into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> WebResult {
    if !notices::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::NoticeNotFound));
    }

    tracing::info!(admin_id = admin.id, notice_id = id, "Notice deleted");
    Ok(SeeOther::to(LIST)
        .success("Notice deleted successfully!")
        .into_response())
}
