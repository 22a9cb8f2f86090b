//! Employee requests: list, respond

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::{EmployeeRequest, RequestStatus};
use shared::{Choice, FieldErrors};

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::requests;
use crate::forms::request::{REPLY_FIELDS, ReplyForm};
use crate::state::AppState;
use crate::web::{SeeOther, View};

fn respond_view(form: &ReplyForm, errors: &FieldErrors, request: &EmployeeRequest) -> View {
    View::form("admin_panel/request_respond", REPLY_FIELDS, form, errors)
        .with("request", request)
        .with("statuses", RequestStatus::options())
}

async fn find(state: &AppState, id: i64) -> Result<EmployeeRequest, AppError> {
    requests::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))
}

pub async fn list(State(state): State<AppState>) -> WebResult {
    let requests = requests::list(&state.pool, None).await?;
    Ok(View::new("admin_panel/request_list")
        .with("requests", requests)
        .into_response())
}

pub async fn respond_page(State(state): State<AppState>, Path(id): Path<i64>) -> WebResult {
    let request = find(&state, id).await?;
    Ok(respond_view(&ReplyForm::from_request(&request), &FieldErrors::new(), &request).into_response())
}

/// POST /admin-panel/requests/respond/{id}/ - stamps the response time
pub async fn respond(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<ReplyForm>,
) -> WebResult {
    let request = find(&state, id).await?;
    let submitted = form.clone();
    let reply = match form.clean() {
        Ok(reply) => reply,
        Err(err) => return err.rerender(|errors| respond_view(&submitted, errors, &request)),
    };
    let status = reply.status;
    requests::respond(&state.pool, id, reply).await?;

    tracing::info!(admin_id = admin.id, request_id = id, status = status.as_str(), "Request answered");
    Ok(SeeOther::to("/admin-panel/requests/")
        .success("Response sent successfully!")
        .into_response())
}
