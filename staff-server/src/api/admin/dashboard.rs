use axum::extract::State;
use axum::response::IntoResponse;

use super::RECENT;
use crate::api::WebResult;
use crate::db::{identities, notices, requests, work};
use crate::state::AppState;
use crate::web::View;

/// GET /admin-panel/
pub async fn dashboard(State(state): State<AppState>) -> WebResult {
    let pool = &state.pool;

    Ok(View::new("admin_panel/dashboard")
        .with("total_employees", identities::count_employees(pool).await?)
        .with("total_notices", notices::count_active(pool).await?)
        .with("pending_requests", requests::count_pending(pool).await?)
        .with("active_work", work::count_active(pool).await?)
        .with("recent_requests", requests::list(pool, Some(RECENT)).await?)
        .with("recent_work", work::list(pool, Some(RECENT)).await?)
        .into_response())
}
