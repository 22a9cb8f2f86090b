//! Work assignments: list, create

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Form;
use shared::models::Priority;
use shared::{Choice, ChoiceOption, FieldErrors};

use super::employee_choices;
use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::work;
use crate::forms::work::{FIELDS, WorkForm};
use crate::state::AppState;
use crate::web::{SeeOther, View};

fn form_view(form: &WorkForm, errors: &FieldErrors, employees: &[ChoiceOption]) -> View {
    View::form("admin_panel/work_form", FIELDS, form, errors)
        .with("action", "Create")
        .with("employees", employees)
        .with("priorities", Priority::options())
}

pub async fn list(State(state): State<AppState>) -> WebResult {
    let works = work::list(&state.pool, None).await?;
    Ok(View::new("admin_panel/work_list")
        .with("works", works)
        .into_response())
}

pub async fn create_page(State(state): State<AppState>) -> WebResult {
    let employees = employee_choices(&state.pool).await?;
    Ok(form_view(&WorkForm::initial(), &FieldErrors::new(), &employees).into_response())
}

/// POST /admin-panel/work/create/ - assigned by the signed-in admin
pub async fn create(
    State(state): State<AppState>,
    admin: CurrentUser,
    Form(form): Form<WorkForm>,
) -> WebResult {
    let employees = employee_choices(&state.pool).await?;
    let submitted = form.clone();
    let data = match form.clean(&state.pool).await {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| form_view(&submitted, errors, &employees)),
    };
    let assigned = work::create(&state.pool, admin.id, data).await?;

    tracing::info!(
        admin_id = admin.id,
        work_id = assigned.id,
        assigned_to = assigned.assigned_to,
        "Work assigned"
    );
    Ok(SeeOther::to("/admin-panel/work/")
        .success("Work assigned successfully!")
        .into_response())
}
