//! Test harness: an in-memory app driven through `oneshot`
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{Identity, IdentityCreate, Role};
use sqlx::SqlitePool;
use tower::ServiceExt;

use staff_server::db::identities;
use staff_server::util::hash_password;
use staff_server::web::Flash;
use staff_server::{AppState, Config, DbService, build_app};

pub const PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = DbService::in_memory().await.unwrap();
        let state = AppState::new(db.pool, config);
        Self {
            app: build_app(state.clone()),
            state,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    /// Account with [`PASSWORD`]
    pub async fn identity(&self, username: &str, role: Role) -> Identity {
        identities::create(
            self.pool(),
            IdentityCreate {
                username: username.into(),
                email: format!("{username}@example.com"),
                first_name: String::new(),
                last_name: String::new(),
                role,
                employee_id: None,
                department: String::new(),
                phone: String::new(),
                profile_picture: None,
                password_hash: hash_password(PASSWORD).unwrap(),
            },
        )
        .await
        .unwrap()
    }

    /// `Cookie` header value for a signed-in session
    pub fn session(&self, identity: &Identity) -> String {
        format!("session={}", self.state.sessions.issue(identity).unwrap())
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, path, cookie, None).await
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, cookie, Some(encode_form(form))).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        form: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let request = match form {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers
            .get(LOCATION)
            .map(|v| v.to_str().unwrap())
            .unwrap_or_default()
    }

    pub fn view(&self) -> &str {
        self.body["view"].as_str().unwrap_or_default()
    }

    pub fn context(&self) -> &Value {
        &self.body["context"]
    }

    /// Field errors of a re-rendered form
    pub fn errors(&self) -> &Value {
        &self.body["context"]["errors"]
    }

    /// Value of a cookie set by this response
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.headers.get_all(SET_COOKIE).iter().find_map(|v| {
            let value = v.to_str().ok()?;
            let (pair, _) = value.split_once(';').unwrap_or((value, ""));
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }

    pub fn flash(&self) -> Option<Flash> {
        self.cookie("flash").and_then(|v| Flash::decode(&v))
    }

    /// Error code of an `AppError` body
    pub fn code(&self) -> u64 {
        self.body["code"].as_u64().unwrap_or_default()
    }
}

fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
