//! Session and role middleware
//!
//! Layering, outermost first:
//!
//! 1. [`resolve_session`] (global): token → identity reload → [`CurrentUser`]
//!    in request extensions. Never rejects.
//! 2. [`require_role`] / [`require_login`] (route layers): consult the gate and
//!    redirect before the controller runs.

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::HeaderMap;
use http::request::Parts;
use shared::AppError;
use shared::models::Role;
use std::convert::Infallible;

use super::gate::{self, GateDecision};
use super::{CurrentUser, SessionService};
use crate::db::identities;
use crate::security_log;
use crate::state::AppState;
use crate::web::cookies::{self, SESSION_COOKIE};

/// Session token from the `session` cookie, else an `Authorization: Bearer` header
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    cookies::read(headers, SESSION_COOKIE)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            headers
                .get(http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(SessionService::extract_from_header)
        })
}

/// Attach the requester's identity when the session is valid and the account
/// still exists and is active
pub async fn resolve_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(user) = load_user(&state, req.headers()).await {
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

async fn load_user(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = session_token(headers)?;
    let claims = match state.sessions.validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(WARN, "session_rejected", error = %e);
            return None;
        }
    };

    let id: i64 = claims.sub.parse().ok()?;
    match identities::find_by_id(&state.pool, id).await {
        Ok(Some(identity)) if identity.is_active => Some(CurrentUser::from(&identity)),
        Ok(_) => {
            security_log!(INFO, "session_identity_gone", user_id = id);
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load session identity");
            None
        }
    }
}

/// Route layer: only identities holding `required` reach the handler
///
/// ```ignore
/// Router::new()
///     .route("/admin-panel/", get(dashboard))
///     .route_layer(middleware::from_fn_with_state(Role::Admin, require_role));
/// ```
pub async fn require_role(State(required): State<Role>, req: Request, next: Next) -> Response {
    let user = req.extensions().get::<CurrentUser>();
    match gate::check(user, required, req.uri().path()) {
        GateDecision::Proceed => next.run(req).await,
        decision => {
            if let Some(user) = user {
                security_log!(
                    WARN,
                    "role_denied",
                    user_id = user.id,
                    username = %user.username,
                    required_role = ?required,
                    path = %req.uri().path()
                );
            }
            decision.into_response()
        }
    }
}

/// Route layer: any signed-in identity reaches the handler
pub async fn require_login(req: Request, next: Next) -> Response {
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }
    GateDecision::Login {
        next: req.uri().path().to_string(),
    }
    .into_response()
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use http::header::{AUTHORIZATION, COOKIE};

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers), Some("from-header"));

        headers.insert(COOKIE, HeaderValue::from_static("session=from-cookie"));
        assert_eq!(session_token(&headers), Some("from-cookie"));
    }

    #[test]
    fn test_empty_cookie_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(session_token(&headers), Some("tok"));
    }
}
