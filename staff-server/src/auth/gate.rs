//! Access gate
//!
//! Decides, before any controller runs, whether a requester may reach an
//! operation that requires a given role.

use axum::response::{IntoResponse, Response};
use shared::models::Role;

use super::CurrentUser;
use crate::web::SeeOther;

pub const LOGIN_PATH: &str = "/accounts/login/";

pub const PERMISSION_DENIED: &str = "You do not have permission to access this page.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Not signed in: go to login, then come back to `next`
    Login { next: String },
    /// Signed in with another role: go to that role's dashboard with an error notice
    WrongRole { dashboard: &'static str },
}

/// Landing page for a role
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin-panel/",
        Role::Employee => "/employee-panel/",
    }
}

/// Login URL that returns to `next` afterwards
pub fn login_url(next: &str) -> String {
    if next.is_empty() || next == "/" {
        LOGIN_PATH.to_string()
    } else {
        format!("{LOGIN_PATH}?next={next}")
    }
}

pub fn check(user: Option<&CurrentUser>, required: Role, path: &str) -> GateDecision {
    match user {
        None => GateDecision::Login {
            next: path.to_string(),
        },
        Some(user) if user.role == required => GateDecision::Proceed,
        Some(user) => GateDecision::WrongRole {
            dashboard: dashboard_path(user.role),
        },
    }
}

impl IntoResponse for GateDecision {
    fn into_response(self) -> Response {
        match self {
            GateDecision::Proceed => {
                tracing::error!("Proceed decision turned into a response");
                http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            GateDecision::Login { next } => SeeOther::to(login_url(&next)).into_response(),
            GateDecision::WrongRole { dashboard } => {
                SeeOther::to(dashboard).error(PERMISSION_DENIED).into_response()
            }
        }
    }
}
