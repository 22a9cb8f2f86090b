//! View rendering
//!
//! Controllers never produce bodies themselves. They hand back a [`View`] and
//! the `render_views` middleware turns it into a response through the
//! configured [`Renderer`], attaching any pending flash notice.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::HeaderValue;
use http::header::{CONTENT_TYPE, SET_COOKIE};
use serde_json::json;
use shared::AppError;

use super::View;
use super::cookies;
use super::flash::{FLASH_COOKIE, Flash};
use crate::state::AppState;

/// A rendered response body
#[derive(Debug, Clone)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

/// Turns a named view and its context into a response body
pub trait Renderer: Send + Sync {
    fn render(&self, view: &View, messages: &[Flash]) -> Result<Rendered, AppError>;
}

/// Emits `{ "view", "context", "messages" }` as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &View, messages: &[Flash]) -> Result<Rendered, AppError> {
        let body = json!({
            "view": view.name,
            "context": view.context,
            "messages": messages,
        });
        let body = serde_json::to_string(&body)
            .map_err(|e| AppError::internal(format!("Failed to render {}: {e}", view.name)))?;
        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}

/// Render any [`View`] left in the response extensions.
///
/// The flash cookie from the request is shown once and then cleared.
pub async fn render_views(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let flash = Flash::from_headers(req.headers());
    let mut res = next.run(req).await;

    let Some(view) = res.extensions_mut().remove::<View>() else {
        return res;
    };

    let messages: Vec<Flash> = flash.into_iter().collect();
    let rendered = match state.renderer.render(&view, &messages) {
        Ok(rendered) => rendered,
        Err(e) => return e.into_response(),
    };

    *res.body_mut() = Body::from(rendered.body);
    let headers = res.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(rendered.content_type));
    headers.remove(http::header::CONTENT_LENGTH);
    if !messages.is_empty() {
        if let Ok(clear) = HeaderValue::from_str(&cookies::clear(FLASH_COOKIE)) {
            headers.append(SET_COOKIE, clear);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::flash::Level;

    #[test]
    fn test_json_renderer_shape() {
        let view = View::new("employee_panel/notice_list").with("notices", Vec::<u8>::new());
        let messages = [Flash::new(Level::Success, "Request submitted successfully!")];

        let rendered = JsonRenderer.render(&view, &messages).unwrap();
        assert_eq!(rendered.content_type, "application/json");

        let body: serde_json::Value = serde_json::from_str(&rendered.body).unwrap();
        assert_eq!(body["view"], "employee_panel/notice_list");
        assert!(body["context"]["notices"].as_array().unwrap().is_empty());
        assert_eq!(body["messages"][0]["level"], "success");
        assert_eq!(body["messages"][0]["message"], "Request submitted successfully!");
    }
}
