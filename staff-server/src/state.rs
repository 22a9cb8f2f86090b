//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionService;
use crate::config::Config;
use crate::web::cookies::{self, SESSION_COOKIE};
use crate::web::{JsonRenderer, Renderer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Session token issuer / validator
    pub sessions: Arc<SessionService>,
    pub config: Arc<Config>,
    /// Presentation collaborator for controller views
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// State with the JSON renderer
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let sessions = SessionService::new(&config.jwt_secret, config.session_hours);
        Self {
            pool,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
            renderer: Arc::new(JsonRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// `Set-Cookie` value carrying a fresh session token
    pub fn session_cookie(&self, token: &str) -> String {
        cookies::set(
            SESSION_COOKIE,
            token,
            Some(self.sessions.max_age_secs()),
            self.config.is_production(),
        )
    }
}
