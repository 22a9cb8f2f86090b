//! Own requests: list, submit, detail

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Form;
use shared::error::{AppError, ErrorCode};
use shared::models::RequestType;
use shared::{Choice, FieldErrors};

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::requests;
use crate::forms::request::{FIELDS, RequestForm};
use crate::state::AppState;
use crate::web::{SeeOther, View};

fn form_view(form: &RequestForm, errors: &FieldErrors) -> View {
    View::form("employee_panel/request_form", FIELDS, form, errors)
        .with("request_types", RequestType::options())
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> WebResult {
    let requests = requests::list_for_employee(&state.pool, user.id, None).await?;
    Ok(View::new("employee_panel/request_list")
        .with("requests", requests)
        .into_response())
}

pub async fn create_page() -> WebResult {
    Ok(form_view(&RequestForm::default(), &FieldErrors::new()).into_response())
}

/// POST /employee-panel/requests/create/ - submitted as the signed-in employee, Pending
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<RequestForm>,
) -> WebResult {
    let submitted = form.clone();
    let data = match form.clean() {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| form_view(&submitted, errors)),
    };
    let request = requests::create(&state.pool, user.id, data).await?;

    tracing::info!(user_id = user.id, request_id = request.id, "Request submitted");
    Ok(SeeOther::to("/employee-panel/requests/")
        .success("Request submitted successfully!")
        .into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> WebResult {
    let request = requests::find_for_employee(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))?;
    Ok(View::new("employee_panel/request_detail")
        .with("request", &request)
        .into_response())
}
