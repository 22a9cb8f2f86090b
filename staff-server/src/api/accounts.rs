//! Account endpoints: login, logout, registration and profile

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Form, Router, middleware};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::FieldErrors;

use super::WebResult;
use crate::auth::gate::LOGIN_PATH;
use crate::auth::{CurrentUser, dashboard_path, require_login};
use crate::db::identities;
use crate::forms::FormError;
use crate::forms::account::{
    INVALID_LOGIN, LOGIN_FIELDS, LoginForm, PROFILE_FIELDS, ProfileForm, REGISTRATION_FIELDS,
    RegistrationForm, registration_roles,
};
use crate::forms::employee::duplicate_from;
use crate::security_log;
use crate::state::AppState;
use crate::util::verify_password;
use crate::web::cookies::{self, SESSION_COOKIE};
use crate::web::{SeeOther, View};

const PROFILE_PATH: &str = "/accounts/profile/";

pub fn router() -> Router<AppState> {
    let public = Router::new()
        .route("/accounts/login/", get(login_page).post(login))
        .route("/accounts/logout/", get(logout).post(logout))
        .route("/accounts/register/", get(register_page).post(register));

    let signed_in = Router::new()
        .route(PROFILE_PATH, get(profile_page).post(update_profile))
        .route_layer(middleware::from_fn(require_login));

    public.merge(signed_in)
}

/// `?next=` target carried through the login form
#[derive(Debug, Default, Deserialize)]
pub struct NextParam {
    #[serde(default)]
    pub next: String,
}

/// Local absolute paths only; anything else lands on `/`
///
/// Browsers drop tabs and newlines from URLs and read a backslash as `/`,
/// so none of those may appear.
fn safe_next(next: &str) -> &str {
    let suspicious = next
        .chars()
        .any(|c| c.is_control() || c.is_whitespace() || c == '\\');
    if suspicious || !next.starts_with('/') || next.starts_with("//") {
        return "/";
    }
    match next.parse::<http::Uri>() {
        Ok(uri) if uri.scheme().is_none() && uri.authority().is_none() => next,
        _ => "/",
    }
}

fn login_view(form: &LoginForm, errors: &FieldErrors, next: &str) -> View {
    View::form("accounts/login", LOGIN_FIELDS, form, errors).with("next", next)
}

/// GET /accounts/login/
pub async fn login_page(user: Option<CurrentUser>, Query(params): Query<NextParam>) -> WebResult {
    if let Some(user) = user {
        return Ok(SeeOther::to(dashboard_path(user.role)).into_response());
    }
    Ok(login_view(&LoginForm::default(), &FieldErrors::new(), &params.next).into_response())
}

/// POST /accounts/login/
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<NextParam>,
    Form(form): Form<LoginForm>,
) -> WebResult {
    let submitted = form.clone();
    let form = match form.clean() {
        Ok(form) => form,
        Err(err) => return err.rerender(|errors| login_view(&submitted, errors, &params.next)),
    };

    let rejected = |message: &str| {
        let mut errors = FieldErrors::new();
        errors.add(FieldErrors::FORM, message);
        FormError::Invalid(errors).rerender(|errors| login_view(&form, errors, &params.next))
    };

    let identity = match identities::find_by_username(&state.pool, &form.username).await? {
        Some(identity) if verify_password(&form.password, &identity.password_hash) => identity,
        _ => {
            security_log!(WARN, "login_failed", username = %form.username);
            return rejected(INVALID_LOGIN);
        }
    };
    if !identity.is_active {
        security_log!(WARN, "login_inactive", user_id = identity.id, username = %identity.username);
        return rejected(ErrorCode::AccountDisabled.message());
    }

    let token = state
        .sessions
        .issue(&identity)
        .map_err(|e| AppError::internal(format!("Failed to issue session: {e}")))?;

    security_log!(INFO, "login_success", user_id = identity.id, username = %identity.username);

    Ok(SeeOther::to(safe_next(&params.next))
        .cookie(state.session_cookie(&token))
        .into_response())
}

/// GET|POST /accounts/logout/
pub async fn logout(user: Option<CurrentUser>) -> WebResult {
    if let Some(user) = user {
        security_log!(INFO, "logout", user_id = user.id, username = %user.username);
    }
    Ok(SeeOther::to(LOGIN_PATH)
        .info("You have been logged out.")
        .cookie(cookies::clear(SESSION_COOKIE))
        .into_response())
}

fn register_view(form: &RegistrationForm, errors: &FieldErrors, allow_admin: bool) -> View {
    View::form("accounts/register", REGISTRATION_FIELDS, form, errors)
        .with("roles", registration_roles(allow_admin))
}

/// GET /accounts/register/
pub async fn register_page(State(state): State<AppState>, user: Option<CurrentUser>) -> WebResult {
    if let Some(user) = user {
        return Ok(SeeOther::to(dashboard_path(user.role)).into_response());
    }
    let allow_admin = state.config.allow_admin_registration;
    Ok(register_view(&RegistrationForm::default(), &FieldErrors::new(), allow_admin).into_response())
}

/// POST /accounts/register/ - create the account and sign it in
pub async fn register(State(state): State<AppState>, Form(form): Form<RegistrationForm>) -> WebResult {
    let allow_admin = state.config.allow_admin_registration;
    let submitted = form.clone();

    let data = match form.clean(&state.pool, allow_admin).await {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| register_view(&submitted, errors, allow_admin)),
    };
    let identity = match identities::create(&state.pool, data).await {
        Ok(identity) => identity,
        Err(e) => {
            return duplicate_from(e).rerender(|errors| register_view(&submitted, errors, allow_admin));
        }
    };

    tracing::info!(
        user_id = identity.id,
        username = %identity.username,
        role = ?identity.role,
        "Account registered"
    );

    let token = state
        .sessions
        .issue(&identity)
        .map_err(|e| AppError::internal(format!("Failed to issue session: {e}")))?;

    Ok(SeeOther::to("/")
        .success("Registration successful!")
        .cookie(state.session_cookie(&token))
        .into_response())
}

fn profile_view(form: &ProfileForm, errors: &FieldErrors) -> View {
    View::form("accounts/profile", PROFILE_FIELDS, form, errors)
}

/// GET /accounts/profile/
pub async fn profile_page(State(state): State<AppState>, user: CurrentUser) -> WebResult {
    let identity = identities::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::IdentityNotFound))?;

    Ok(profile_view(&ProfileForm::from_identity(&identity), &FieldErrors::new())
        .with("identity", &identity)
        .into_response())
}

/// POST /accounts/profile/
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ProfileForm>,
) -> WebResult {
    let submitted = form.clone();
    let data = match form.clean() {
        Ok(data) => data,
        Err(err) => return err.rerender(|errors| profile_view(&submitted, errors)),
    };
    identities::update_profile(&state.pool, user.id, data).await?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(SeeOther::to(PROFILE_PATH)
        .success("Profile updated successfully!")
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next("/admin-panel/work/"), "/admin-panel/work/");
        assert_eq!(safe_next(""), "/");
        assert_eq!(safe_next("https://evil.example/"), "/");
        assert_eq!(safe_next("//evil.example/"), "/");
        assert_eq!(safe_next("/\\evil.example/"), "/");
        assert_eq!(safe_next("/\t/evil.example/"), "/");
        assert_eq!(safe_next("/\n"), "/");
        assert_eq!(safe_next("/ /evil.example/"), "/");
        assert_eq!(safe_next("/work\\..\\evil"), "/");
        assert_eq!(safe_next("/employee-panel/work/?page=2"), "/employee-panel/work/?page=2");
    }
}
