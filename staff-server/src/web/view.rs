//! Controller outcomes: a named view to render, or a redirect

use axum::response::{IntoResponse, Response};
use http::header::{LOCATION, SET_COOKIE};
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use shared::FieldErrors;

use super::flash::{Flash, Level};
use crate::forms::FieldSpec;

/// A named view plus its context, rendered by [`super::render_views`]
#[derive(Debug, Clone)]
pub struct View {
    pub name: &'static str,
    pub status: StatusCode,
    pub context: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: StatusCode::OK,
            context: Map::new(),
        }
    }

    /// Form view: field presentation map, submitted values and errors
    pub fn form(
        name: &'static str,
        fields: &[FieldSpec],
        values: &impl Serialize,
        errors: &FieldErrors,
    ) -> Self {
        Self::new(name)
            .with("fields", fields)
            .with("values", values)
            .with("errors", errors)
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let mut res = self.status.into_response();
        res.extensions_mut().insert(self);
        res
    }
}

/// `303 See Other` with an optional flash notice and extra cookies
#[derive(Debug, Clone)]
pub struct SeeOther {
    location: String,
    flash: Option<Flash>,
    cookies: Vec<String>,
}

impl SeeOther {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            flash: None,
            cookies: Vec::new(),
        }
    }

    pub fn flash(mut self, level: Level, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::new(level, message));
        self
    }

    pub fn success(self, message: impl Into<String>) -> Self {
        self.flash(Level::Success, message)
    }

    pub fn error(self, message: impl Into<String>) -> Self {
        self.flash(Level::Error, message)
    }

    pub fn info(self, message: impl Into<String>) -> Self {
        self.flash(Level::Info, message)
    }

    /// Attach a complete `Set-Cookie` value
    pub fn cookie(mut self, set_cookie: String) -> Self {
        self.cookies.push(set_cookie);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        let mut res = StatusCode::SEE_OTHER.into_response();
        let headers = res.headers_mut();

        match HeaderValue::from_str(&self.location) {
            Ok(location) => {
                headers.insert(LOCATION, location);
            }
            Err(_) => {
                tracing::error!(location = %self.location, "Invalid redirect location");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }

        let cookies = self.flash.iter().map(Flash::to_cookie).chain(self.cookies);
        for cookie in cookies {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.append(SET_COOKIE, value);
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Widget;

    #[test]
    fn test_view_rides_in_extensions() {
        let res = View::new("admin_panel/dashboard")
            .with("total_employees", 3)
            .status(StatusCode::CONFLICT)
            .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let view = res.extensions().get::<View>().unwrap();
        assert_eq!(view.name, "admin_panel/dashboard");
        assert_eq!(view.context["total_employees"], 3);
    }

    #[test]
    fn test_form_context() {
        const FIELDS: &[FieldSpec] = &[FieldSpec::new("title", "Title", Widget::Text).required()];
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");

        let view = View::form(
            "admin_panel/notice_form",
            FIELDS,
            &serde_json::json!({ "title": "" }),
            &errors,
        );
        assert_eq!(view.context["fields"][0]["name"], "title");
        assert_eq!(view.context["fields"][0]["widget"], "text");
        assert_eq!(view.context["fields"][0]["required"], true);
        assert_eq!(view.context["errors"]["title"][0], "This field is required.");
        assert_eq!(view.context["values"]["title"], "");
    }

    #[test]
    fn test_see_other_sets_location_and_cookies() {
        let res = SeeOther::to("/admin-panel/notices/")
            .success("Notice published successfully!")
            .cookie("session=abc; Path=/".into())
            .into_response();

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[LOCATION], "/admin-panel/notices/");

        let cookies: Vec<_> = res
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("flash="));
        assert_eq!(cookies[1], "session=abc; Path=/");
    }
}
