//! Employee surface (`/employee-panel/...`)
//!
//! Every route sits behind the Employee role gate and only ever sees the
//! signed-in employee's own records. Another employee's record id answers
//! 404, the same as an id that does not exist.

mod attendance;
mod dashboard;
mod notices;
mod requests;
mod work;

use axum::routing::get;
use axum::{Router, middleware};
use shared::models::Role;

use crate::auth::require_role;
use crate::state::AppState;

const RECENT: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employee-panel/", get(dashboard::dashboard))
        .route("/employee-panel/work/", get(work::list))
        .route("/employee-panel/work/{id}/", get(work::detail))
        .route(
            "/employee-panel/work/{id}/update/",
            get(work::update_page).post(work::update),
        )
        .route("/employee-panel/requests/", get(requests::list))
        .route(
            "/employee-panel/requests/create/",
            get(requests::create_page).post(requests::create),
        )
        .route("/employee-panel/requests/{id}/", get(requests::detail))
        .route("/employee-panel/notices/", get(notices::list))
        .route("/employee-panel/attendance/", get(attendance::list))
        .route_layer(middleware::from_fn_with_state(Role::Employee, require_role))
}
