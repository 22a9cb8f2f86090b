//! Site root

use axum::response::{IntoResponse, Response};

use crate::auth::{CurrentUser, dashboard_path};
use crate::auth::gate::LOGIN_PATH;
use crate::web::SeeOther;

/// GET / - the caller's dashboard, or login when signed out
pub async fn index(user: Option<CurrentUser>) -> Response {
    match user {
        Some(user) => SeeOther::to(dashboard_path(user.role)).into_response(),
        None => SeeOther::to(LOGIN_PATH).into_response(),
    }
}
