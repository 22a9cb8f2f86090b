use axum::extract::State;
use axum::response::IntoResponse;

use crate::api::WebResult;
use crate::db::notices;
use crate::state::AppState;
use crate::web::View;

/// GET /employee-panel/notices/ - active notices only
pub async fn list(State(state): State<AppState>) -> WebResult {
    let notices = notices::list_active(&state.pool, None).await?;
    Ok(View::new("employee_panel/notice_list")
        .with("notices", notices)
        .into_response())
}
