use axum::extract::State;
use axum::response::IntoResponse;

use super::RECENT;
use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::{notices, requests, work};
use crate::state::AppState;
use crate::web::View;

/// GET /employee-panel/
pub async fn dashboard(State(state): State<AppState>, user: CurrentUser) -> WebResult {
    let pool = &state.pool;
    let counts = work::counts_for_assignee(pool, user.id).await?;

    Ok(View::new("employee_panel/dashboard")
        .with("total_work", counts.total)
        .with("pending_work", counts.pending)
        .with("in_progress_work", counts.in_progress)
        .with("completed_work", counts.completed)
        .with("recent_work", work::list_for_assignee(pool, user.id, Some(RECENT)).await?)
        .with("recent_notices", notices::list_active(pool, Some(RECENT)).await?)
        .with("my_requests", requests::list_for_employee(pool, user.id, Some(RECENT)).await?)
        .into_response())
}
