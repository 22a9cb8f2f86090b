use axum::extract::State;
use axum::response::IntoResponse;

use crate::api::WebResult;
use crate::auth::CurrentUser;
use crate::db::attendance;
use crate::state::AppState;
use crate::web::View;

/// GET /employee-panel/attendance/
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> WebResult {
    let records = attendance::list_for_employee(&state.pool, user.id).await?;
    Ok(View::new("employee_panel/attendance_list")
        .with("attendance_records", records)
        .into_response())
}
