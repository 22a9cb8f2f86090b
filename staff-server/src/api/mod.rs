//! HTTP routes
//!
//! Three surfaces share one router: `/accounts/...` (public and signed-in),
//! `/admin-panel/...` (Admin role) and `/employee-panel/...` (Employee role).
//! Role surfaces are guarded by a route layer, so the gate runs before any
//! controller touches the store.

pub mod accounts;
pub mod admin;
pub mod employee;
pub mod health;
pub mod home;
pub mod middleware;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::response::Response;
use axum::routing::get;
use http::{HeaderName, HeaderValue};
use shared::AppError;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::resolve_session;
use crate::state::AppState;
use crate::web::render_views;

/// Result type of every controller
pub type WebResult = Result<Response, AppError>;

const REQUEST_ID: &str = "x-request-id";

#[derive(Clone, Default)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without middleware or state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        .merge(accounts::router())
        .merge(admin::router())
        .merge(employee::router())
}

/// Fully layered application, used by the server and by tests
pub fn build_app(state: AppState) -> Router {
    build_router()
        // Render controller views (innermost, sees the final response)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            render_views,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            XRequestId,
        ))
        // Resolve the session first so every layer below sees the user
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            resolve_session,
        ))
        .with_state(state)
}
